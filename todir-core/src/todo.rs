//! The Todo type and its building blocks.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::reminder::Reminder;
use crate::repeat::Repeat;

/// A todo item, stored as one VTODO .ics file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,

    /// When the todo is due. Undated todos never appear on the agenda.
    pub due: Option<TodoTime>,

    pub priority: Priority,
    pub status: TodoStatus,

    /// Repeat rule expanding the due date into a series.
    pub repeat: Option<Repeat>,

    /// Reminders relative to the due instant.
    pub reminders: Vec<Reminder>,

    /// Completion timestamp (COMPLETED).
    pub completed: Option<DateTime<Utc>>,

    /// Last modification timestamp (LAST-MODIFIED).
    pub updated: Option<DateTime<Utc>>,

    /// Unrecognized X- properties, preserved for round-tripping.
    pub custom_properties: Vec<(String, String)>,
}

impl Todo {
    /// A fresh todo with a random id and default everything else.
    pub fn new(summary: impl Into<String>, due: Option<TodoTime>) -> Self {
        Todo {
            id: Uuid::new_v4().to_string(),
            summary: summary.into(),
            description: None,
            due,
            priority: Priority::NONE,
            status: TodoStatus::NeedsAction,
            repeat: None,
            reminders: Vec::new(),
            completed: None,
            updated: None,
            custom_properties: Vec::new(),
        }
    }

    /// Mark completed as of now.
    pub fn complete(&mut self) {
        self.status = TodoStatus::Completed;
        self.completed = Some(Utc::now());
    }

    /// Put a completed or cancelled todo back on the list.
    pub fn reopen(&mut self) {
        self.status = TodoStatus::NeedsAction;
        self.completed = None;
    }

    /// Whether the todo still needs doing.
    pub fn is_open(&self) -> bool {
        matches!(self.status, TodoStatus::NeedsAction | TodoStatus::InProcess)
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

/// When a todo is due: a whole day, or a floating local date-time.
/// Todos carry no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TodoTime {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl TodoTime {
    /// The calendar date of the due point.
    pub fn date(&self) -> NaiveDate {
        match self {
            TodoTime::Date(d) => *d,
            TodoTime::DateTime(dt) => dt.date(),
        }
    }

    /// The due point as an instant. All-day todos resolve to midnight.
    pub fn as_datetime(&self) -> NaiveDateTime {
        match self {
            TodoTime::Date(d) => d.and_hms_opt(0, 0, 0).unwrap(),
            TodoTime::DateTime(dt) => *dt,
        }
    }

    pub fn is_all_day(&self) -> bool {
        matches!(self, TodoTime::Date(_))
    }
}

impl fmt::Display for TodoTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoTime::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            TodoTime::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M")),
        }
    }
}

/// RFC 5545 VTODO status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoStatus {
    NeedsAction,
    InProcess,
    Completed,
    Cancelled,
}

impl TodoStatus {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            TodoStatus::NeedsAction => "NEEDS-ACTION",
            TodoStatus::InProcess => "IN-PROCESS",
            TodoStatus::Completed => "COMPLETED",
            TodoStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn from_ics_str(s: &str) -> Option<TodoStatus> {
        match s {
            "NEEDS-ACTION" => Some(TodoStatus::NeedsAction),
            "IN-PROCESS" => Some(TodoStatus::InProcess),
            "COMPLETED" => Some(TodoStatus::Completed),
            "CANCELLED" => Some(TodoStatus::Cancelled),
            _ => None,
        }
    }
}

/// RFC 5545 priority: 0 is undefined, 1 the highest, 9 the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority(u8);

impl Priority {
    pub const NONE: Priority = Priority(0);

    /// Clamp into the 0–9 range.
    pub fn new(value: u8) -> Self {
        Priority(value.min(9))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0 != 0
    }

    /// Sort rank: undefined priorities go after 9, not before 1.
    pub fn rank(&self) -> u8 {
        if self.0 == 0 { 10 } else { self.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_defaults() {
        let todo = Todo::new("Water the plants", None);

        assert_eq!(todo.status, TodoStatus::NeedsAction);
        assert_eq!(todo.priority, Priority::NONE);
        assert!(todo.is_open());
        assert!(todo.reminders.is_empty());
        assert!(!todo.id.is_empty());
    }

    #[test]
    fn complete_and_reopen_toggle_status() {
        let mut todo = Todo::new("File taxes", None);

        todo.complete();
        assert_eq!(todo.status, TodoStatus::Completed);
        assert!(todo.completed.is_some());
        assert!(!todo.is_open());

        todo.reopen();
        assert_eq!(todo.status, TodoStatus::NeedsAction);
        assert!(todo.completed.is_none());
        assert!(todo.is_open());
    }

    #[test]
    fn status_ics_roundtrip() {
        for status in [
            TodoStatus::NeedsAction,
            TodoStatus::InProcess,
            TodoStatus::Completed,
            TodoStatus::Cancelled,
        ] {
            assert_eq!(TodoStatus::from_ics_str(status.as_ics_str()), Some(status));
        }
        assert_eq!(TodoStatus::from_ics_str("DRAFT"), None);
    }

    #[test]
    fn priority_clamps_and_ranks() {
        assert_eq!(Priority::new(12).value(), 9);
        assert_eq!(Priority::new(3).value(), 3);
        assert!(!Priority::NONE.is_set());

        // Undefined sorts after every defined priority.
        assert!(Priority::NONE.rank() > Priority::new(9).rank());
        assert!(Priority::new(1).rank() < Priority::new(2).rank());
    }

    #[test]
    fn todo_time_display() {
        let date = TodoTime::Date(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        let timed = TodoTime::DateTime(
            NaiveDate::from_ymd_opt(2024, 3, 20)
                .unwrap()
                .and_hms_opt(15, 30, 0)
                .unwrap(),
        );

        assert_eq!(date.to_string(), "2024-03-20");
        assert_eq!(timed.to_string(), "2024-03-20 15:30");
        assert!(date.is_all_day());
        assert!(!timed.is_all_day());
    }
}
