//! ICS file parsing using the icalendar crate's parser.

use crate::ics::{REPEAT_PROP, UNTIL_PROP};
use crate::reminder::Reminder;
use crate::repeat::Repeat;
use crate::stride::ComponentDelta;
use crate::todo::{Priority, Todo, TodoStatus, TodoTime};
use chrono::{DateTime, NaiveDate, Utc};
use icalendar::{
    DatePerhapsTime,
    parser::{read_calendar, unfold},
};

/// Parse ICS content into a Todo. Returns `None` when the content holds
/// no usable VTODO; malformed optional fields are dropped, not fatal.
pub fn parse_todo(content: &str) -> Option<Todo> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;
    let vtodo = calendar.components.iter().find(|c| c.name == "VTODO")?;

    // Required fields
    let id = vtodo.find_prop("UID")?.val.to_string();
    let summary = vtodo
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    // Optional simple fields
    let description = vtodo.find_prop("DESCRIPTION").map(|p| p.val.to_string());

    let due = vtodo
        .find_prop("DUE")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_todo_time);

    let priority = vtodo
        .find_prop("PRIORITY")
        .and_then(|p| p.val.as_ref().parse().ok())
        .map(Priority::new)
        .unwrap_or(Priority::NONE);

    let status = vtodo
        .find_prop("STATUS")
        .and_then(|p| TodoStatus::from_ics_str(p.val.as_ref()))
        .unwrap_or(TodoStatus::NeedsAction);

    let completed = vtodo
        .find_prop("COMPLETED")
        .and_then(|p| parse_utc_stamp(p.val.as_ref()));

    let updated = vtodo
        .find_prop("LAST-MODIFIED")
        .and_then(|p| parse_utc_stamp(p.val.as_ref()));

    // Repeat rule from X-TODIR-REPEAT / X-TODIR-UNTIL
    let repeat = vtodo.find_prop(REPEAT_PROP).and_then(|p| {
        let every = ComponentDelta::from_iso8601(p.val.as_ref()).ok()?;
        let until = vtodo
            .find_prop(UNTIL_PROP)
            .and_then(|p| NaiveDate::parse_from_str(p.val.as_ref(), "%Y%m%d").ok());
        Repeat::new(every, until).ok()
    });

    // Reminders from VALARM components
    let reminders: Vec<Reminder> = vtodo
        .components
        .iter()
        .filter(|c| c.name == "VALARM")
        .filter_map(|alarm| {
            let trigger = alarm.find_prop("TRIGGER")?.val.as_ref();
            let minutes = parse_trigger_minutes(trigger)?;
            Some(Reminder { minutes })
        })
        .collect();

    // Custom X- properties (preserved for round-tripping), excluding the
    // repeat properties parsed above
    let custom_properties: Vec<(String, String)> = vtodo
        .properties
        .iter()
        .filter(|p| {
            p.name.as_ref().starts_with("X-") && p.name != REPEAT_PROP && p.name != UNTIL_PROP
        })
        .map(|p| (p.name.to_string(), p.val.to_string()))
        .collect();

    Some(Todo {
        id,
        summary,
        description,
        due,
        priority,
        status,
        repeat,
        reminders,
        completed,
        updated,
        custom_properties,
    })
}

/// Convert icalendar's DatePerhapsTime to a TodoTime. Zoned and UTC due
/// times collapse into the floating model: the civil time is kept, the
/// zone dropped.
fn to_todo_time(dpt: DatePerhapsTime) -> TodoTime {
    match dpt {
        DatePerhapsTime::Date(d) => TodoTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => TodoTime::DateTime(dt.naive_utc()),
            icalendar::CalendarDateTime::Floating(naive) => TodoTime::DateTime(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, .. } => {
                TodoTime::DateTime(date_time)
            }
        },
    }
}

/// Parse an RFC 5545 UTC timestamp (20240320T150000Z).
fn parse_utc_stamp(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim_end_matches('Z');
    chrono::NaiveDateTime::parse_from_str(trimmed, "%Y%m%dT%H%M%S")
        .ok()
        .map(|dt| dt.and_utc())
}

/// Parse TRIGGER value to minutes before due (-PT30M, -P1D, etc.)
fn parse_trigger_minutes(value: &str) -> Option<i64> {
    let is_before = value.starts_with('-');
    let duration_str = value.trim_start_matches('-');

    let duration = iso8601::duration(duration_str).ok()?;
    let std_duration: std::time::Duration = duration.into();
    let minutes = (std_duration.as_secs() / 60) as i64;

    Some(if is_before { minutes } else { -minutes })
}
