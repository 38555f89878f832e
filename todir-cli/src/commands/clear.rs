use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use todir_core::store::TodoStore;

pub fn run(force: bool) -> Result<()> {
    let store = TodoStore::from_config()?;
    let count = store.todos()?.len();

    if count == 0 {
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Delete all {} todo{} in {}?",
                count,
                if count == 1 { "" } else { "s" },
                store.dir().display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Aborted".dimmed());
            return Ok(());
        }
    }

    let removed = store.clear()?;
    println!("{}", format!("  Removed {removed} todos").red());
    Ok(())
}
