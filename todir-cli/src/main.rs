mod commands;
mod logging;
mod render;
mod when;

use anyhow::Result;
use clap::{Parser, Subcommand};
use todir_core::date_range::DateRange;

#[derive(Parser)]
#[command(name = "todir")]
#[command(about = "Manage the todos in your plaintext todo directory")]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a todo
    Add {
        title: Option<String>,

        /// Due date/time (e.g. "tomorrow 9am", "2026-03-20")
        #[arg(short, long)]
        due: Option<String>,

        /// Priority, 1 (highest) to 9 (lowest)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=9))]
        priority: Option<u8>,

        /// Repeat interval (e.g. "weekly", "2 weeks", "P1M")
        #[arg(short, long)]
        every: Option<String>,

        /// Last date the repeat may fall on (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,

        /// Reminder lead time before due (e.g. "30m", "1day"); repeatable
        #[arg(short, long = "remind")]
        remind: Vec<String>,

        /// Longer free-form note
        #[arg(long)]
        description: Option<String>,
    },
    /// List todos
    List {
        /// Include completed and cancelled todos
        #[arg(short, long)]
        all: bool,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show what's coming up, repeats expanded, grouped by day
    Agenda {
        /// Show occurrences from this date (YYYY-MM-DD, or "start" for everything overdue)
        #[arg(long)]
        from: Option<String>,

        /// Show occurrences until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Mark a todo as completed
    Done {
        /// Number from `todir list`, or a unique id prefix
        reference: String,
    },
    /// Put a completed todo back on the list
    Undo {
        /// Number from `todir list`, or a unique id prefix
        reference: String,
    },
    /// Delete a todo
    Remove {
        /// Number from `todir list`, or a unique id prefix
        reference: String,
    },
    /// Delete every todo in the directory
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show configuration and paths
    Config {
        /// Set the todo directory and save it to the config file
        #[arg(long)]
        dir: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Add {
            title,
            due,
            priority,
            every,
            until,
            remind,
            description,
        } => commands::add::run(title, due, priority, every, until, remind, description),
        Commands::List { all, json } => commands::list::run(all, json),
        Commands::Agenda { from, to } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())?;
            commands::agenda::run(range)
        }
        Commands::Done { reference } => commands::done::run(&reference, false),
        Commands::Undo { reference } => commands::done::run(&reference, true),
        Commands::Remove { reference } => commands::remove::run(&reference),
        Commands::Clear { force } => commands::clear::run(force),
        Commands::Config { dir } => commands::config::run(dir.as_deref()),
    }
}
