//! Calendar date striding.
//!
//! A [`DateStride`] lazily yields the sequence `start + delta × k` for
//! k = 0, 1, 2, …, so the start date itself is the first element. The
//! delta is re-scaled from the start for every element rather than
//! accumulated, which keeps month-end clamping stable (a monthly stride
//! from Jan 31 yields Feb 28/29, then Mar 31 again).
//!
//! The sequence ends at the first candidate the calendar cannot represent
//! or that falls past the optional inclusive cutoff. Both conditions
//! surface as plain iterator exhaustion, never as an error or a panic.

use chrono::{Days, Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TodirError, TodirResult};

// ===== ComponentDelta =====

/// A calendar-field delta: one optional signed magnitude per field.
///
/// Unset fields are not part of the delta: they are never scaled and
/// never applied. `{ days: Some(0) }` and `{ days: None }` are different
/// values with the same arithmetic effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDelta {
    pub years: Option<i32>,
    pub months: Option<i32>,
    pub weeks: Option<i32>,
    pub days: Option<i32>,
    pub hours: Option<i32>,
    pub minutes: Option<i32>,
    pub seconds: Option<i32>,
}

impl ComponentDelta {
    pub fn years(n: i32) -> Self {
        ComponentDelta { years: Some(n), ..Default::default() }
    }

    pub fn months(n: i32) -> Self {
        ComponentDelta { months: Some(n), ..Default::default() }
    }

    pub fn weeks(n: i32) -> Self {
        ComponentDelta { weeks: Some(n), ..Default::default() }
    }

    pub fn days(n: i32) -> Self {
        ComponentDelta { days: Some(n), ..Default::default() }
    }

    pub fn hours(n: i32) -> Self {
        ComponentDelta { hours: Some(n), ..Default::default() }
    }

    pub fn minutes(n: i32) -> Self {
        ComponentDelta { minutes: Some(n), ..Default::default() }
    }

    pub fn seconds(n: i32) -> Self {
        ComponentDelta { seconds: Some(n), ..Default::default() }
    }

    /// True when no field is set. An empty delta strides nowhere: an
    /// iterator built from one repeats its start date indefinitely.
    pub fn is_empty(&self) -> bool {
        *self == ComponentDelta::default()
    }

    /// Whether the delta shifts the time of day.
    pub fn has_time(&self) -> bool {
        seconds_of(self) != 0
    }

    /// Whether every set field is positive, i.e. the delta only moves
    /// forward in time.
    pub fn is_forward(&self) -> bool {
        !self.is_empty()
            && [
                self.years,
                self.months,
                self.weeks,
                self.days,
                self.hours,
                self.minutes,
                self.seconds,
            ]
            .iter()
            .all(|f| f.is_none_or(|v| v > 0))
    }

    /// Multiply every set field by `k`; unset fields stay unset. Scaling
    /// by zero therefore keeps set fields, at zero. Returns `None` when
    /// any multiplication leaves the `i32` range.
    pub fn scaled(&self, k: u32) -> Option<ComponentDelta> {
        let k = i32::try_from(k).ok()?;
        let scale = |field: Option<i32>| -> Option<Option<i32>> {
            match field {
                None => Some(None),
                Some(v) => v.checked_mul(k).map(Some),
            }
        };

        Some(ComponentDelta {
            years: scale(self.years)?,
            months: scale(self.months)?,
            weeks: scale(self.weeks)?,
            days: scale(self.days)?,
            hours: scale(self.hours)?,
            minutes: scale(self.minutes)?,
            seconds: scale(self.seconds)?,
        })
    }

    /// Parse an ISO-8601 duration (`P2W`, `P1M3D`, `PT30M`) into a delta.
    /// Zero-valued components come back unset.
    pub fn from_iso8601(s: &str) -> TodirResult<ComponentDelta> {
        let duration = iso8601::duration(s).map_err(TodirError::InvalidRepeat)?;

        let field = |v: u32| -> TodirResult<Option<i32>> {
            if v == 0 {
                return Ok(None);
            }
            i32::try_from(v)
                .map(Some)
                .map_err(|_| TodirError::InvalidRepeat(format!("component out of range in '{s}'")))
        };

        match duration {
            iso8601::Duration::Weeks(w) => Ok(ComponentDelta { weeks: field(w)?, ..Default::default() }),
            iso8601::Duration::YMDHMS { year, month, day, hour, minute, second, millisecond } => {
                if millisecond != 0 {
                    return Err(TodirError::InvalidRepeat(format!(
                        "sub-second precision not supported: '{s}'"
                    )));
                }
                Ok(ComponentDelta {
                    years: field(year)?,
                    months: field(month)?,
                    weeks: None,
                    days: field(day)?,
                    hours: field(hour)?,
                    minutes: field(minute)?,
                    seconds: field(second)?,
                })
            }
        }
    }

    /// Render as an ISO-8601 duration. Week-only deltas use the `P2W`
    /// form; weeks alongside other date fields are spelled as days, since
    /// the week designator cannot be combined. An empty delta renders as
    /// `P0D`.
    pub fn to_iso8601(&self) -> String {
        if let Some(w) = self.weeks {
            if self.years.is_none() && self.months.is_none() && self.days.is_none() && !self.has_time()
            {
                return format!("P{}W", w);
            }
        }

        let mut out = String::from("P");
        if let Some(y) = self.years {
            out.push_str(&format!("{y}Y"));
        }
        if let Some(m) = self.months {
            out.push_str(&format!("{m}M"));
        }
        let days = match (self.weeks, self.days) {
            (Some(w), Some(d)) => Some(i64::from(w) * 7 + i64::from(d)),
            (Some(w), None) => Some(i64::from(w) * 7),
            (None, d) => d.map(i64::from),
        };
        if let Some(d) = days {
            out.push_str(&format!("{d}D"));
        }
        if self.has_time() {
            out.push('T');
            if let Some(h) = self.hours {
                out.push_str(&format!("{h}H"));
            }
            if let Some(m) = self.minutes {
                out.push_str(&format!("{m}M"));
            }
            if let Some(s) = self.seconds {
                out.push_str(&format!("{s}S"));
            }
        }
        if out == "P" {
            out.push_str("0D");
        }
        out
    }
}

/// Human-readable form: "2 weeks", "1 month, 3 days".
impl fmt::Display for ComponentDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let mut push = |n: Option<i32>, unit: &str| {
            if let Some(n) = n {
                if n != 0 {
                    let plural = if n.abs() == 1 { "" } else { "s" };
                    parts.push(format!("{} {}{}", n, unit, plural));
                }
            }
        };
        push(self.years, "year");
        push(self.months, "month");
        push(self.weeks, "week");
        push(self.days, "day");
        push(self.hours, "hour");
        push(self.minutes, "minute");
        push(self.seconds, "second");

        if parts.is_empty() {
            return write!(f, "0 days");
        }
        write!(f, "{}", parts.join(", "))
    }
}

// Field totals, folded the way chrono applies them: years into months,
// weeks into days, the time fields into seconds. i64 keeps the folds
// overflow-free for any i32 inputs.

fn months_of(delta: &ComponentDelta) -> i64 {
    i64::from(delta.years.unwrap_or(0)) * 12 + i64::from(delta.months.unwrap_or(0))
}

fn days_of(delta: &ComponentDelta) -> i64 {
    i64::from(delta.weeks.unwrap_or(0)) * 7 + i64::from(delta.days.unwrap_or(0))
}

fn seconds_of(delta: &ComponentDelta) -> i64 {
    i64::from(delta.hours.unwrap_or(0)) * 3600
        + i64::from(delta.minutes.unwrap_or(0)) * 60
        + i64::from(delta.seconds.unwrap_or(0))
}

// ===== StridePoint =====

/// A point in calendar time that a [`ComponentDelta`] can shift.
///
/// This is the arithmetic seam of the stride: `checked_add_delta` returns
/// `None` whenever the shifted point has no valid calendrical encoding,
/// either out of chrono's date range or a time-of-day shift applied to a
/// date-only point.
pub trait StridePoint: Copy + PartialOrd {
    fn checked_add_delta(&self, delta: &ComponentDelta) -> Option<Self>;
}

impl StridePoint for NaiveDate {
    fn checked_add_delta(&self, delta: &ComponentDelta) -> Option<Self> {
        // A date-only point cannot encode a time-of-day shift.
        if delta.has_time() {
            return None;
        }

        let months = months_of(delta);
        let days = days_of(delta);

        let date = if months >= 0 {
            self.checked_add_months(Months::new(u32::try_from(months).ok()?))?
        } else {
            self.checked_sub_months(Months::new(u32::try_from(-months).ok()?))?
        };
        if days >= 0 {
            date.checked_add_days(Days::new(days as u64))
        } else {
            date.checked_sub_days(Days::new(days.unsigned_abs()))
        }
    }
}

impl StridePoint for NaiveDateTime {
    fn checked_add_delta(&self, delta: &ComponentDelta) -> Option<Self> {
        let months = months_of(delta);
        let days = days_of(delta);

        let dt = if months >= 0 {
            self.checked_add_months(Months::new(u32::try_from(months).ok()?))?
        } else {
            self.checked_sub_months(Months::new(u32::try_from(-months).ok()?))?
        };
        let dt = if days >= 0 {
            dt.checked_add_days(Days::new(days as u64))?
        } else {
            dt.checked_sub_days(Days::new(days.unsigned_abs()))?
        };
        dt.checked_add_signed(TimeDelta::seconds(seconds_of(delta)))
    }
}

// ===== DateStride =====

/// Lazy iterator over `start + delta × k`, k = 0, 1, 2, …
///
/// The cutoff is inclusive and checked against every candidate, the
/// start included: a cutoff before the start yields an empty sequence.
/// Once the iterator returns `None` it stays exhausted; replaying the
/// sequence means building a new stride from the same inputs.
#[derive(Debug, Clone)]
pub struct DateStride<T> {
    start: T,
    delta: ComponentDelta,
    until: Option<T>,
    step: Option<u32>,
}

impl<T: StridePoint> DateStride<T> {
    pub fn new(start: T, delta: ComponentDelta, until: Option<T>) -> Self {
        DateStride { start, delta, until, step: Some(0) }
    }
}

impl<T: StridePoint> Iterator for DateStride<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let step = self.step?;

        let candidate = self
            .delta
            .scaled(step)
            .and_then(|scaled| self.start.checked_add_delta(&scaled));
        let Some(candidate) = candidate else {
            self.step = None;
            return None;
        };

        if let Some(until) = self.until {
            if candidate > until {
                self.step = None;
                return None;
            }
        }

        self.step = step.checked_add(1);
        Some(candidate)
    }
}
