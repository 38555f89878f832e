//! Date range for windowing occurrence expansion.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

use crate::constants::DEFAULT_AGENDA_DAYS;
use crate::error::{TodirError, TodirResult};

/// Inclusive range over naive local instants.
/// `None` bounds mean unbounded in that direction.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl Default for DateRange {
    /// Today ± DEFAULT_AGENDA_DAYS.
    fn default() -> Self {
        let now = Local::now().naive_local();
        DateRange {
            from: Some(now - TimeDelta::days(DEFAULT_AGENDA_DAYS)),
            to: Some(now + TimeDelta::days(DEFAULT_AGENDA_DAYS)),
        }
    }
}

impl DateRange {
    /// Build a range from CLI-style arguments.
    /// - `from`: a YYYY-MM-DD date, or "start" for unbounded past;
    ///   defaults to DEFAULT_AGENDA_DAYS ago.
    /// - `to`: a YYYY-MM-DD date; defaults to DEFAULT_AGENDA_DAYS ahead.
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> TodirResult<Self> {
        let from_dt = match from {
            Some("start") => None,
            Some(s) => Some(parse_date_start(s)?),
            None => Some(Local::now().naive_local() - TimeDelta::days(DEFAULT_AGENDA_DAYS)),
        };

        let to_dt = match to {
            Some(s) => Some(parse_date_end(s)?),
            None => Some(Local::now().naive_local() + TimeDelta::days(DEFAULT_AGENDA_DAYS)),
        };

        Ok(DateRange { from: from_dt, to: to_dt })
    }

    /// Whether an instant falls inside the range. Bounds are inclusive.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        if let Some(from) = self.from {
            if t < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if t > to {
                return false;
            }
        }
        true
    }
}

/// Parse YYYY-MM-DD as the start of that day.
fn parse_date_start(s: &str) -> TodirResult<NaiveDateTime> {
    Ok(parse_date(s)?.and_hms_opt(0, 0, 0).unwrap())
}

/// Parse YYYY-MM-DD as the end of that day.
fn parse_date_end(s: &str) -> TodirResult<NaiveDateTime> {
    Ok(parse_date(s)?.and_hms_opt(23, 59, 59).unwrap())
}

fn parse_date(s: &str) -> TodirResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        TodirError::InvalidDate(format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn explicit_bounds_are_inclusive_day_edges() {
        let range = DateRange::from_args(Some("2024-03-01"), Some("2024-03-10")).unwrap();

        assert!(range.contains(at(2024, 3, 1, 0)));
        assert!(range.contains(at(2024, 3, 10, 23)));
        assert!(!range.contains(at(2024, 2, 29, 23)));
        assert!(!range.contains(at(2024, 3, 11, 0)));
    }

    #[test]
    fn start_sentinel_is_unbounded_past() {
        let range = DateRange::from_args(Some("start"), Some("2024-03-10")).unwrap();

        assert!(range.from.is_none());
        assert!(range.contains(at(1990, 1, 1, 12)));
        assert!(!range.contains(at(2024, 3, 11, 0)));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(DateRange::from_args(Some("03/01/2024"), None).is_err());
        assert!(DateRange::from_args(None, Some("next tuesday")).is_err());
    }

    #[test]
    fn unbounded_range_contains_everything() {
        let range = DateRange { from: None, to: None };

        assert!(range.contains(at(1900, 1, 1, 0)));
        assert!(range.contains(at(2200, 12, 31, 23)));
    }
}
