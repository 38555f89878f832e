//! Repeat rules for todos.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TodirError, TodirResult};
use crate::stride::ComponentDelta;

/// How a todo's due date repeats: a calendar-field delta applied per step,
/// optionally bounded by an inclusive end date.
///
/// The delta powering a stored repeat is constrained beyond what the
/// stride itself accepts: it must be non-empty (an empty delta would pin
/// the series to its start forever) and strictly forward (negative
/// components have no ISO-8601 encoding to round-trip through).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repeat {
    pub every: ComponentDelta,
    pub until: Option<NaiveDate>,
}

impl Repeat {
    pub fn new(every: ComponentDelta, until: Option<NaiveDate>) -> TodirResult<Self> {
        if every.is_empty() {
            return Err(TodirError::InvalidRepeat(
                "repeat interval has no components".to_string(),
            ));
        }
        if !every.is_forward() {
            return Err(TodirError::InvalidRepeat(format!(
                "repeat interval must move forward: '{}'",
                every
            )));
        }

        Ok(Repeat { every, until })
    }

    /// The inclusive cutoff for a series of timed due points: the whole
    /// of the `until` day counts.
    pub fn until_datetime(&self) -> Option<NaiveDateTime> {
        self.until.map(|d| d.and_hms_opt(23, 59, 59).unwrap())
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {}", self.every)?;
        if let Some(until) = self.until {
            write!(f, " until {}", until.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}
