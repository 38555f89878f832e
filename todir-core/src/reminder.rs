//! Reminder offsets for todos.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reminder attached to a todo: fires `minutes` before the due instant.
/// Zero means at the time the todo is due; negative values fire after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub minutes: i64,
}

impl Reminder {
    pub fn at_time_of_due() -> Self {
        Reminder { minutes: 0 }
    }

    pub fn minutes_before(minutes: i64) -> Self {
        Reminder { minutes }
    }

    pub fn hours_before(hours: i64) -> Self {
        Reminder { minutes: hours * 60 }
    }

    pub fn days_before(days: i64) -> Self {
        Reminder { minutes: days * 24 * 60 }
    }

    /// The instant this reminder fires for a todo due at `due`.
    pub fn trigger_for(&self, due: NaiveDateTime) -> NaiveDateTime {
        due - TimeDelta::minutes(self.minutes)
    }
}

/// Human label: "30 minutes before", "2 hours before", "at time of due".
impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minutes == 0 {
            return write!(f, "at time of due");
        }

        let (magnitude, suffix) = if self.minutes > 0 {
            (self.minutes, "before")
        } else {
            (-self.minutes, "after")
        };

        let (count, unit) = if magnitude % (24 * 60) == 0 {
            (magnitude / (24 * 60), "day")
        } else if magnitude % 60 == 0 {
            (magnitude / 60, "hour")
        } else {
            (magnitude, "minute")
        };

        let plural = if count == 1 { "" } else { "s" };
        write!(f, "{} {}{} {}", count, unit, plural, suffix)
    }
}
