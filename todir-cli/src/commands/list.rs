use anyhow::Result;
use owo_colors::OwoColorize;
use todir_core::store::{LocalTodo, TodoStore};
use todir_core::TodoTime;

use crate::render::Render;

pub fn run(all: bool, json: bool) -> Result<()> {
    let store = TodoStore::from_config()?;
    let mut todos = store.todos()?;
    if !all {
        todos.retain(|t| t.todo.is_open());
    }

    if json {
        let items: Vec<_> = todos.iter().map(|t| &t.todo).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if todos.is_empty() {
        println!("{}", "No todos found".dimmed());
        println!();
        println!("Add one with:");
        println!("  todir add \"Water the plants\" --due tomorrow");
        return Ok(());
    }

    let now = chrono::Local::now().naive_local();
    for (i, local) in todos.iter().enumerate() {
        println!("{}", render_line(i + 1, local, now));
    }

    Ok(())
}

fn render_line(number: usize, local: &LocalTodo, now: chrono::NaiveDateTime) -> String {
    let todo = &local.todo;

    let mut line = format!(
        "{} {} {}",
        format!("{number:>3}.").dimmed(),
        todo.status.render(),
        todo.summary
    );

    let priority = todo.priority.render();
    if !priority.is_empty() {
        line.push_str(&format!(" {priority}"));
    }

    if let Some(due) = &todo.due {
        let overdue = todo.is_open() && is_overdue(due, now);
        let label = due.to_string();
        if overdue {
            line.push_str(&format!("  {}", label.red()));
        } else {
            line.push_str(&format!("  {}", label.dimmed()));
        }
    }

    if let Some(repeat) = &todo.repeat {
        line.push_str(&format!("  {}", format!("({repeat})").dimmed()));
    }

    line
}

/// An all-day todo only counts as overdue once its whole day has passed.
fn is_overdue(due: &TodoTime, now: chrono::NaiveDateTime) -> bool {
    match due {
        TodoTime::Date(d) => *d < now.date(),
        TodoTime::DateTime(dt) => *dt < now,
    }
}
