use anyhow::Result;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use todir_core::store::TodoStore;
use todir_core::{Priority, Reminder, Repeat, Todo, TodoTime};
use tracing::debug;

use crate::when;

/// Reminder choices offered in the interactive prompt, as minutes before
/// the due instant. `None` is no reminder at all.
const REMINDER_PRESETS: &[(&str, Option<i64>)] = &[
    ("None", None),
    ("At time of due", Some(0)),
    ("30 minutes before", Some(30)),
    ("1 hour before", Some(60)),
    ("2 hours before", Some(120)),
    ("1 day before", Some(1440)),
    ("2 days before", Some(2880)),
];

pub fn run(
    title: Option<String>,
    due: Option<String>,
    priority: Option<u8>,
    every: Option<String>,
    until: Option<String>,
    remind: Vec<String>,
    description: Option<String>,
) -> Result<()> {
    let interactive = title.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  What needs doing?")
            .interact_text()?,
    };

    // --- Due ---
    let due = if let Some(d) = due {
        Some(when::parse_due(&d)?)
    } else if interactive {
        prompt_due()?
    } else {
        None
    };

    // --- Repeat ---
    let repeat = build_repeat(every.as_deref(), until.as_deref(), due.as_ref())?;

    // --- Reminders ---
    let mut reminders = Vec::new();
    for input in &remind {
        reminders.push(when::parse_reminder(input)?);
    }
    if reminders.is_empty() && interactive && due.is_some() {
        reminders.extend(prompt_reminder()?);
    }

    let mut todo = Todo::new(title, due);
    todo.priority = priority.map(Priority::new).unwrap_or(Priority::NONE);
    todo.repeat = repeat;
    todo.reminders = reminders;
    todo.description = description.filter(|d| !d.is_empty());

    let store = TodoStore::from_config()?;
    let local = store.create(&todo)?;
    debug!("Wrote {}", local.path.display());

    if interactive {
        println!();
    }
    let mut line = format!("  Added: {}", todo.summary);
    if let Some(due) = &todo.due {
        line.push_str(&format!(" (due {due})"));
    }
    if let Some(repeat) = &todo.repeat {
        line.push_str(&format!(", {repeat}"));
    }
    println!("{}", line.green());

    Ok(())
}

/// Combine the repeat flags into a rule, rejecting combinations that
/// can't mean anything.
fn build_repeat(
    every: Option<&str>,
    until: Option<&str>,
    due: Option<&TodoTime>,
) -> Result<Option<Repeat>> {
    let Some(interval) = every else {
        if until.is_some() {
            anyhow::bail!("--until only applies to repeating todos (add --every)");
        }
        return Ok(None);
    };

    let Some(due) = due else {
        anyhow::bail!("A repeating todo needs a due date to repeat from (add --due)");
    };

    let delta = when::parse_interval(interval)?;
    if due.is_all_day() && delta.has_time() {
        anyhow::bail!(
            "\"{}\" repeats within the day, but the due date has no time. \
            Give the due date a time (e.g. --due \"tomorrow 9am\")",
            interval
        );
    }

    let until = until.map(when::parse_until).transpose()?;
    Ok(Some(Repeat::new(delta, until)?))
}

/// Prompt for a due date; empty input means the todo is undated.
fn prompt_due() -> Result<Option<TodoTime>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  When is it due? (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(None);
        }
        match when::parse_due(&input) {
            Ok(t) => return Ok(Some(t)),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn prompt_reminder() -> Result<Option<Reminder>> {
    let items: Vec<&str> = REMINDER_PRESETS.iter().map(|(label, _)| *label).collect();
    let selection = Select::new()
        .with_prompt("  Remind you?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(REMINDER_PRESETS[selection].1.map(Reminder::minutes_before))
}
