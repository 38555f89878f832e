//! ICS file generation.

use crate::error::TodirResult;
use crate::ics::{REPEAT_PROP, UNTIL_PROP};
use crate::todo::{Todo, TodoStatus, TodoTime};
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

/// Generate .ics content for a todo.
pub fn generate_ics(todo: &Todo) -> TodirResult<String> {
    let mut cal = Calendar::new();

    let mut vtodo = icalendar::Todo::new();
    vtodo.uid(&todo.id);
    vtodo.summary(&todo.summary);

    // DTSTAMP - required by RFC 5545, use updated timestamp or current time
    let dtstamp = todo
        .updated
        .unwrap_or_else(chrono::Utc::now)
        .format("%Y%m%dT%H%M%SZ")
        .to_string();
    vtodo.add_property("DTSTAMP", &dtstamp);

    // LAST-MODIFIED
    if let Some(updated) = todo.updated {
        let last_modified = updated.format("%Y%m%dT%H%M%SZ").to_string();
        vtodo.add_property("LAST-MODIFIED", &last_modified);
    }

    if let Some(ref due) = todo.due {
        add_due_property(&mut vtodo, due);
    }

    if let Some(ref desc) = todo.description {
        vtodo.description(desc);
    }

    // PRIORITY - only emit when defined (0 means undefined)
    if todo.priority.is_set() {
        vtodo.add_property("PRIORITY", todo.priority.value().to_string());
    }

    // STATUS - only emit if not NEEDS-ACTION (the implied default)
    if todo.status != TodoStatus::NeedsAction {
        vtodo.add_property("STATUS", todo.status.as_ics_str());
    }

    if let Some(completed) = todo.completed {
        vtodo.add_property("COMPLETED", completed.format("%Y%m%dT%H%M%SZ").to_string());
    }

    // Repeat rule: interval as an ISO-8601 duration, end date alongside.
    // RRULE cannot express a compound interval, hence the X- properties.
    if let Some(ref repeat) = todo.repeat {
        vtodo.add_property(REPEAT_PROP, repeat.every.to_iso8601());
        if let Some(until) = repeat.until {
            vtodo.add_property(UNTIL_PROP, until.format("%Y%m%d").to_string());
        }
    }

    // Add alarms (VALARM components) - minimal per RFC 5545
    for reminder in &todo.reminders {
        let trigger = Trigger::before_start(chrono::Duration::minutes(reminder.minutes));
        let alarm = Alarm::display("Reminder", trigger);
        vtodo.alarm(alarm);
    }

    // Custom properties, preserved for round-tripping
    for (key, value) in &todo.custom_properties {
        vtodo.add_property(key, value);
    }

    let vtodo = vtodo.done();
    cal.push(vtodo);
    let cal = cal.done();

    // Post-process to remove unnecessary bloat from the icalendar crate's output
    let output = strip_ics_bloat(&cal.to_string());

    Ok(output)
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with TODIR (we post-process the output)
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:TODIR\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Add the DUE property with proper formatting based on the TodoTime variant
fn add_due_property(vtodo: &mut icalendar::Todo, due: &TodoTime) {
    match due {
        TodoTime::Date(d) => {
            let mut prop = Property::new("DUE", d.format("%Y%m%d").to_string());
            prop.append_parameter(ValueType::Date);
            vtodo.append_property(prop);
        }
        TodoTime::DateTime(dt) => {
            // Floating datetime (no Z, no TZID)
            vtodo.add_property("DUE", dt.format("%Y%m%dT%H%M%S").to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::Reminder;
    use crate::repeat::Repeat;
    use crate::stride::ComponentDelta;
    use crate::todo::Priority;
    use chrono::NaiveDate;

    fn make_test_todo() -> Todo {
        let mut todo = Todo::new(
            "Water the plants",
            Some(TodoTime::Date(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())),
        );
        todo.id = "test-todo-123@todir".to_string();
        todo
    }

    #[test]
    fn test_generate_all_day_due_has_value_date() {
        let todo = make_test_todo();

        let ics = generate_ics(&todo).unwrap();

        assert!(
            ics.contains("DUE;VALUE=DATE:20240320"),
            "DUE should have VALUE=DATE parameter. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_timed_due_is_floating() {
        let mut todo = make_test_todo();
        todo.due = Some(TodoTime::DateTime(
            NaiveDate::from_ymd_opt(2024, 3, 20)
                .unwrap()
                .and_hms_opt(15, 30, 0)
                .unwrap(),
        ));

        let ics = generate_ics(&todo).unwrap();

        assert!(
            ics.contains("DUE:20240320T153000"),
            "Timed DUE should be floating. ICS:\n{}",
            ics
        );
        let due_line = ics.lines().find(|l| l.starts_with("DUE")).unwrap();
        assert!(!due_line.ends_with('Z'), "Floating DUE must not carry a Z suffix");
    }

    #[test]
    fn test_generate_omits_default_status_and_priority() {
        let todo = make_test_todo();

        let ics = generate_ics(&todo).unwrap();

        assert!(!ics.contains("STATUS:"), "Default status should be omitted. ICS:\n{}", ics);
        assert!(!ics.contains("PRIORITY:"), "Unset priority should be omitted. ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_emits_non_default_status_and_priority() {
        let mut todo = make_test_todo();
        todo.priority = Priority::new(1);
        todo.complete();

        let ics = generate_ics(&todo).unwrap();

        assert!(ics.contains("PRIORITY:1"), "ICS:\n{}", ics);
        assert!(ics.contains("STATUS:COMPLETED"), "ICS:\n{}", ics);
        assert!(ics.contains("COMPLETED:"), "Completion timestamp expected. ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_repeat_properties() {
        let mut todo = make_test_todo();
        let every = ComponentDelta { months: Some(1), days: Some(3), ..Default::default() };
        todo.repeat = Some(
            Repeat::new(every, Some(NaiveDate::from_ymd_opt(2026, 12, 1).unwrap())).unwrap(),
        );

        let ics = generate_ics(&todo).unwrap();

        assert!(ics.contains("X-TODIR-REPEAT:P1M3D"), "ICS:\n{}", ics);
        assert!(ics.contains("X-TODIR-UNTIL:20261201"), "ICS:\n{}", ics);
    }

    #[test]
    fn test_generate_alarm_is_minimal() {
        let mut todo = make_test_todo();
        todo.reminders = vec![Reminder::minutes_before(30)];

        let ics = generate_ics(&todo).unwrap();

        assert!(ics.contains("BEGIN:VALARM"), "Should have VALARM");
        assert!(ics.contains("ACTION:DISPLAY"), "Should have ACTION:DISPLAY");
        assert!(ics.contains("TRIGGER"), "Should have TRIGGER");

        // Should NOT have UID or DTSTAMP inside VALARM (they're not required)
        let valarm_section: String = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
            .to_string();
        assert!(
            !valarm_section.contains("UID:"),
            "VALARM should not have UID. Got:\n{}",
            valarm_section
        );
        assert!(
            !valarm_section.contains("DTSTAMP:"),
            "VALARM should not have DTSTAMP. Got:\n{}",
            valarm_section
        );
    }

    #[test]
    fn test_generate_swaps_prodid_and_drops_calscale() {
        let ics = generate_ics(&make_test_todo()).unwrap();

        assert!(ics.contains("PRODID:TODIR"), "ICS:\n{}", ics);
        assert!(!ics.contains("CALSCALE"), "ICS:\n{}", ics);
    }
}
