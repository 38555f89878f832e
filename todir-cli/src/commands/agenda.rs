use anyhow::Result;
use owo_colors::OwoColorize;
use todir_core::date_range::DateRange;
use todir_core::schedule;
use todir_core::store::TodoStore;
use tracing::debug;

use crate::render::{self, Render};

pub fn run(range: DateRange) -> Result<()> {
    let store = TodoStore::from_config()?;
    let todos = store.todos()?;
    let occurrences = schedule::upcoming(&todos, &range);
    debug!("Expanded {} todos into {} occurrences", todos.len(), occurrences.len());

    if occurrences.is_empty() {
        println!("{}", "Nothing due in this range".dimmed());
        return Ok(());
    }

    // Group occurrences by day and print
    let mut current_date: Option<String> = None;

    for occurrence in &occurrences {
        let date_label = render::format_date_label(occurrence.due.date());

        if current_date.as_ref() != Some(&date_label) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label.bold());
            current_date = Some(date_label);
        }

        let time = render::format_time(&occurrence.due);
        let priority = occurrence.priority.render();
        if priority.is_empty() {
            println!("  {} {}", time, occurrence.summary);
        } else {
            println!("  {} {} {}", time, occurrence.summary, priority);
        }
    }

    Ok(())
}
