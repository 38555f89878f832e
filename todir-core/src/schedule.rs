//! Occurrence expansion for agendas and reminders.
//!
//! Expands each todo's due date, through its repeat rule when it has one,
//! into concrete occurrences inside a date range. Reminder trigger
//! instants are derived per occurrence, and the notifier's feed filters
//! them down to a firing window.

use chrono::{NaiveDateTime, TimeDelta};

use crate::constants::{MAX_EXPANSION, MAX_SCAN};
use crate::date_range::DateRange;
use crate::store::LocalTodo;
use crate::stride::DateStride;
use crate::todo::{Priority, Todo, TodoTime};

/// One concrete due point of a todo.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub todo_id: String,
    pub summary: String,
    pub priority: Priority,
    pub due: TodoTime,
    /// Reminder firing instants for this occurrence.
    pub triggers: Vec<NaiveDateTime>,
}

/// A reminder that should fire: its trigger instant plus enough context
/// to format a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct DueReminder {
    pub todo_id: String,
    pub summary: String,
    pub due: TodoTime,
    pub trigger: NaiveDateTime,
}

/// Expand one todo into occurrences within the range.
///
/// Undated todos produce none. Non-repeating todos produce at most one.
/// A repeating todo strides from its due date with the repeat interval,
/// cut off at the repeat's end date, windowed to the range and capped at
/// MAX_EXPANSION instances.
pub fn expand_todo(todo: &Todo, range: &DateRange) -> Vec<Occurrence> {
    let Some(due) = todo.due else {
        return Vec::new();
    };

    let dues: Vec<TodoTime> = match &todo.repeat {
        None => {
            if range.contains(due.as_datetime()) {
                vec![due]
            } else {
                Vec::new()
            }
        }
        Some(repeat) => match due {
            TodoTime::Date(d) => window(
                DateStride::new(d, repeat.every, repeat.until).map(TodoTime::Date),
                range,
            ),
            TodoTime::DateTime(dt) => window(
                DateStride::new(dt, repeat.every, repeat.until_datetime()).map(TodoTime::DateTime),
                range,
            ),
        },
    };

    dues.into_iter().map(|d| occurrence_for(todo, d)).collect()
}

/// Window a due sequence to the range: skip entries before the start,
/// stop past the end, cap the expansion. Relies on stored repeats being
/// forward-only, so the sequence is non-decreasing.
fn window(dues: impl Iterator<Item = TodoTime>, range: &DateRange) -> Vec<TodoTime> {
    dues.take(MAX_SCAN)
        .skip_while(|d| range.from.is_some_and(|from| d.as_datetime() < from))
        .take_while(|d| range.to.is_none_or(|to| d.as_datetime() <= to))
        .take(MAX_EXPANSION)
        .collect()
}

fn occurrence_for(todo: &Todo, due: TodoTime) -> Occurrence {
    let due_instant = due.as_datetime();
    let triggers = todo
        .reminders
        .iter()
        .map(|r| r.trigger_for(due_instant))
        .collect();

    Occurrence {
        todo_id: todo.id.clone(),
        summary: todo.summary.clone(),
        priority: todo.priority,
        due,
        triggers,
    }
}

/// Expand every open todo into occurrences within the range, sorted by
/// due. Completed and cancelled todos are skipped.
pub fn upcoming(todos: &[LocalTodo], range: &DateRange) -> Vec<Occurrence> {
    let mut occurrences: Vec<Occurrence> = todos
        .iter()
        .filter(|t| t.todo.is_open())
        .flat_map(|t| expand_todo(&t.todo, range))
        .collect();

    occurrences.sort_by_key(|o| o.due.as_datetime());
    occurrences
}

/// Reminders triggering within `[now, now + lookahead]` across all open
/// todos, sorted by trigger instant.
pub fn due_reminders(
    todos: &[LocalTodo],
    now: NaiveDateTime,
    lookahead: TimeDelta,
) -> Vec<DueReminder> {
    let open: Vec<&LocalTodo> = todos.iter().filter(|t| t.todo.is_open()).collect();

    // A trigger precedes its due point by up to the largest reminder
    // offset, so the occurrence search has to reach that far beyond the
    // firing window (and behind it, for after-due reminders).
    let max_before = open
        .iter()
        .flat_map(|t| t.todo.reminders.iter())
        .map(|r| r.minutes.max(0))
        .max()
        .unwrap_or(0);
    let max_after = open
        .iter()
        .flat_map(|t| t.todo.reminders.iter())
        .map(|r| (-r.minutes).max(0))
        .max()
        .unwrap_or(0);

    let range = DateRange {
        from: Some(now - TimeDelta::minutes(max_after)),
        to: Some(now + lookahead + TimeDelta::minutes(max_before)),
    };
    let window_end = now + lookahead;

    let mut fires: Vec<DueReminder> = Vec::new();
    for local in &open {
        for occurrence in expand_todo(&local.todo, &range) {
            for trigger in &occurrence.triggers {
                if *trigger >= now && *trigger <= window_end {
                    fires.push(DueReminder {
                        todo_id: occurrence.todo_id.clone(),
                        summary: occurrence.summary.clone(),
                        due: occurrence.due,
                        trigger: *trigger,
                    });
                }
            }
        }
    }

    fires.sort_by_key(|f| f.trigger);
    fires
}
