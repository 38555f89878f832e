//! Watches the todo directory and posts a desktop notification for each
//! reminder as its trigger time arrives.

use std::collections::HashSet;
use std::process;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDateTime, TimeDelta};
use clap::Parser;
use notify_rust::Notification;
use todir_core::schedule::{self, DueReminder};
use todir_core::store::TodoStore;
use todir_core::TodoTime;

#[derive(Parser)]
#[command(name = "todir-notify")]
#[command(about = "Desktop notifications for todir reminders")]
struct Args {
    /// How far ahead of a trigger a check may fire it (e.g. "15m")
    #[arg(long, default_value = "15m", value_parser = humantime::parse_duration)]
    lookahead: Duration,

    /// Time between checks of the todo directory (e.g. "60s")
    #[arg(long, default_value = "60s", value_parser = humantime::parse_duration)]
    interval: Duration,

    /// Check once and exit instead of looping
    #[arg(long)]
    once: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let store = TodoStore::from_config()?;
    let lookahead = TimeDelta::from_std(args.lookahead)?;

    // Triggers already posted this run, so a trigger inside the lookahead
    // window notifies once rather than on every check.
    let mut posted: HashSet<(String, NaiveDateTime)> = HashSet::new();

    loop {
        let now = chrono::Local::now().naive_local();
        check(&store, now, lookahead, &mut posted)?;

        if args.once {
            return Ok(());
        }
        thread::sleep(args.interval);
    }
}

/// One pass: reload the directory, find reminders triggering within the
/// lookahead window, post the ones not posted yet.
fn check(
    store: &TodoStore,
    now: NaiveDateTime,
    lookahead: TimeDelta,
    posted: &mut HashSet<(String, NaiveDateTime)>,
) -> Result<()> {
    let todos = store.todos()?;

    for fire in schedule::due_reminders(&todos, now, lookahead) {
        let key = (fire.todo_id.clone(), fire.trigger);
        if posted.contains(&key) {
            continue;
        }

        // A broken notification daemon shouldn't kill the loop.
        if let Err(e) = post(&fire, now) {
            eprintln!("Failed to show notification for '{}': {e}", fire.summary);
            continue;
        }
        posted.insert(key);
    }

    Ok(())
}

fn post(fire: &DueReminder, now: NaiveDateTime) -> Result<()> {
    Notification::new()
        .appname("todir")
        .summary(&fire.summary)
        .body(&notification_body(&fire.due, now))
        .show()?;
    Ok(())
}

/// Body line under the summary: when the todo is due, relative to today.
fn notification_body(due: &TodoTime, now: NaiveDateTime) -> String {
    let day = if due.date() == now.date() {
        "today".to_string()
    } else {
        due.date().format("%a %b %-d").to_string()
    };

    match due {
        TodoTime::Date(_) => format!("Due {day}"),
        TodoTime::DateTime(dt) => format!("Due {day} at {}", dt.format("%H:%M")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn body_for_timed_todo_due_today() {
        let due = TodoTime::DateTime(at(2026, 3, 20, 15, 0));

        assert_eq!(
            notification_body(&due, at(2026, 3, 20, 14, 45)),
            "Due today at 15:00"
        );
    }

    #[test]
    fn body_for_timed_todo_on_another_day() {
        let due = TodoTime::DateTime(at(2026, 3, 20, 9, 30));

        assert_eq!(
            notification_body(&due, at(2026, 3, 19, 9, 30)),
            "Due Fri Mar 20 at 09:30"
        );
    }

    #[test]
    fn body_for_all_day_todo() {
        let due = TodoTime::Date(NaiveDate::from_ymd_opt(2026, 3, 20).unwrap());

        assert_eq!(notification_body(&due, at(2026, 3, 20, 8, 0)), "Due today");
        assert_eq!(
            notification_body(&due, at(2026, 3, 18, 8, 0)),
            "Due Fri Mar 20"
        );
    }
}
