//! ICS (VTODO) generation and parsing.
//!
//! This module handles reading and writing .ics files according to RFC 5545.

mod generate;
mod parse;

pub use generate::generate_ics;
pub use parse::parse_todo;

/// X- property carrying the repeat interval as an ISO-8601 duration.
pub(crate) const REPEAT_PROP: &str = "X-TODIR-REPEAT";

/// X- property carrying the inclusive repeat end date (YYYYMMDD).
pub(crate) const UNTIL_PROP: &str = "X-TODIR-UNTIL";
