//! Shared constants for the todir ecosystem.

/// Default agenda window in days from today.
pub const DEFAULT_AGENDA_DAYS: i64 = 30;

/// Maximum number of occurrences expanded per repeating todo.
pub const MAX_EXPANSION: usize = 365;

/// Maximum number of stride candidates examined while positioning an
/// expansion window. Bounds the scan when a repeat's due date lies far
/// before the window start.
pub const MAX_SCAN: usize = 10_000;
