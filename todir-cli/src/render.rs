//! TUI rendering traits for todir types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to todir-core types using owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use todir_core::{Priority, TodoStatus, TodoTime};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for TodoStatus {
    fn render(&self) -> String {
        match self {
            TodoStatus::NeedsAction => "[ ]".to_string(),
            TodoStatus::InProcess => "[~]".yellow().to_string(),
            TodoStatus::Completed => "[x]".green().to_string(),
            TodoStatus::Cancelled => "[-]".dimmed().to_string(),
        }
    }
}

impl Render for Priority {
    fn render(&self) -> String {
        if !self.is_set() {
            return String::new();
        }
        // RFC 5545 CUA mapping: 1-4 high, 5 medium, 6-9 low.
        let label = format!("!{}", self.value());
        match self.value() {
            1..=4 => label.red().to_string(),
            5 => label.yellow().to_string(),
            _ => label.dimmed().to_string(),
        }
    }
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate) -> String {
    let today = chrono::Local::now().date_naive();

    let diff = (date - today).num_days();
    match diff {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Format the time portion of a due point (e.g. "15:00" or "all-day")
pub fn format_time(due: &TodoTime) -> String {
    match due {
        TodoTime::Date(_) => "all-day".to_string(),
        TodoTime::DateTime(dt) => format!("{:>7}", dt.format("%H:%M")),
    }
}
