//! Parsing for the human-facing date, interval and reminder inputs.

use anyhow::Result;
use chrono::NaiveDate;
use todir_core::stride::ComponentDelta;
use todir_core::{Reminder, TodoTime};

/// Parse a natural language date/time string into a TodoTime.
/// If the input contains time tokens (am/pm, HH:MM, noon, midnight, "at"),
/// returns DateTime. Otherwise returns Date (all-day).
pub fn parse_due(input: &str) -> Result<TodoTime> {
    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    if has_time_component(input) {
        Ok(TodoTime::DateTime(dt))
    } else {
        Ok(TodoTime::Date(dt.date()))
    }
}

/// Parse the date a repeat stops at. Takes `YYYY-MM-DD` or the same
/// natural language `parse_due` takes; any time of day is discarded.
pub fn parse_until(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    parse_due(input).map(|t| t.date())
}

/// Parse a repeat interval: a named frequency ("daily", "weekly"), an
/// amount with units ("2 weeks", "1 month 3 days", "90min"), or a raw
/// ISO-8601 duration ("P2W").
pub fn parse_interval(input: &str) -> Result<ComponentDelta> {
    let trimmed = input.trim();

    if trimmed.starts_with(['P', 'p']) {
        return Ok(ComponentDelta::from_iso8601(&trimmed.to_ascii_uppercase())?);
    }

    if let Some(named) = named_frequency(trimmed) {
        return Ok(named);
    }

    let mut delta = ComponentDelta::default();
    let words = unit_words(trimmed);

    let mut i = 0;
    while i < words.len() {
        let (count, unit, advance) = match words[i].parse::<i32>() {
            Ok(n) => {
                let Some(unit) = words.get(i + 1) else {
                    anyhow::bail!("Missing unit after \"{}\" in \"{}\"", words[i], input);
                };
                (n, unit.as_str(), 2)
            }
            // A bare unit word means one of it: "week" = "1 week".
            Err(_) => (1, words[i].as_str(), 1),
        };
        add_component(&mut delta, unit, count)
            .ok_or_else(|| anyhow::anyhow!("Could not parse repeat interval: \"{}\"", input))?;
        i += advance;
    }

    if delta.is_empty() {
        anyhow::bail!("Could not parse repeat interval: \"{}\"", input);
    }
    Ok(delta)
}

/// Parse a reminder lead time: a humantime duration ("30m", "1day 12h"),
/// or "due" for a reminder at the due instant itself.
pub fn parse_reminder(input: &str) -> Result<Reminder> {
    let trimmed = input.trim().to_lowercase();
    if trimmed == "due" || trimmed == "0" {
        return Ok(Reminder::at_time_of_due());
    }

    let duration = humantime::parse_duration(&trimmed)
        .map_err(|_| anyhow::anyhow!("Could not parse reminder offset: \"{}\"", input))?;

    let secs = duration.as_secs();
    if secs % 60 != 0 {
        anyhow::bail!("Reminder offsets are minute-granular, got \"{}\"", input);
    }
    Ok(Reminder::minutes_before((secs / 60) as i64))
}

fn named_frequency(input: &str) -> Option<ComponentDelta> {
    match input.to_lowercase().as_str() {
        "hourly" => Some(ComponentDelta::hours(1)),
        "daily" => Some(ComponentDelta::days(1)),
        "weekly" => Some(ComponentDelta::weeks(1)),
        "biweekly" | "fortnightly" => Some(ComponentDelta::weeks(2)),
        "monthly" => Some(ComponentDelta::months(1)),
        "quarterly" => Some(ComponentDelta::months(3)),
        "yearly" | "annually" => Some(ComponentDelta::years(1)),
        _ => None,
    }
}

/// Split "2 weeks", "2w" and "1 month 3 days" into alternating number and
/// unit words, dropping filler.
fn unit_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    for c in input.to_lowercase().chars() {
        if c.is_whitespace() || c == ',' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        // A digit/letter boundary splits fused forms like "2w".
        if !current.is_empty() && c.is_ascii_digit() != current_is_digit {
            words.push(std::mem::take(&mut current));
        }
        current_is_digit = c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.retain(|w| w != "every" && w != "each" && w != "and");
    words
}

fn add_component(delta: &mut ComponentDelta, unit: &str, count: i32) -> Option<()> {
    let slot = match unit {
        "y" | "yr" | "yrs" | "year" | "years" => &mut delta.years,
        "mo" | "mon" | "month" | "months" => &mut delta.months,
        "w" | "wk" | "wks" | "week" | "weeks" => &mut delta.weeks,
        "d" | "day" | "days" => &mut delta.days,
        "h" | "hr" | "hrs" | "hour" | "hours" => &mut delta.hours,
        "m" | "min" | "mins" | "minute" | "minutes" => &mut delta.minutes,
        "s" | "sec" | "secs" | "second" | "seconds" => &mut delta.seconds,
        _ => return None,
    };
    *slot = Some(slot.unwrap_or(0) + count);
    Some(())
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let mut result = String::new();
    let lower = input.to_lowercase();

    for (i, word) in lower.split_whitespace().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let expanded = abbrevs
            .iter()
            .find(|(abbr, _)| *abbr == word)
            .map(|(_, full)| *full)
            .unwrap_or(word);
        result.push_str(expanded);
    }

    result
}

/// Check if the user's input string contains time-related tokens.
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    // am/pm patterns like "6pm", "6 pm", "11am"
    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'a' || b == b'p') && i + 1 < bytes.len() && bytes[i + 1] == b'm' {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }
    }

    // HH:MM pattern (digit(s):digit(s))
    for (i, &b) in bytes.iter().enumerate() {
        if b == b':' {
            let has_digit_before = i > 0 && bytes[i - 1].is_ascii_digit();
            let has_digit_after = i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit();
            if has_digit_before && has_digit_after {
                return true;
            }
        }
    }

    // "at" followed by a digit (e.g. "at 3", "at 15")
    if let Some(pos) = lower.find(" at ") {
        let after = &lower[pos + 4..];
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }
    if let Some(after) = lower.strip_prefix("at ") {
        if after.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    // --- parse_due ---

    #[test]
    fn due_with_time_returns_datetime() {
        let result = parse_due("tomorrow 3pm").unwrap();
        assert!(matches!(result, TodoTime::DateTime(_)));
    }

    #[test]
    fn due_date_only_returns_all_day() {
        let result = parse_due("tomorrow").unwrap();
        assert!(matches!(result, TodoTime::Date(_)));
    }

    #[test]
    fn due_abbreviation_works() {
        let result = parse_due("sat 3pm").unwrap();
        assert!(matches!(result, TodoTime::DateTime(_)));
    }

    #[test]
    fn due_absolute_date() {
        let result = parse_due("march 20").unwrap();
        assert!(matches!(result, TodoTime::Date(_)));
        if let TodoTime::Date(d) = result {
            assert_eq!(d.month(), 3);
            assert_eq!(d.day(), 20);
        }
    }

    #[test]
    fn due_invalid_input() {
        assert!(parse_due("not a date at all xyz").is_err());
    }

    // --- has_time_component ---

    #[test]
    fn time_component_am_pm() {
        assert!(has_time_component("tomorrow 6pm"));
        assert!(has_time_component("friday 11am"));
        assert!(has_time_component("sat 3 pm"));
        assert!(has_time_component("9AM"));
    }

    #[test]
    fn time_component_colon_and_keywords() {
        assert!(has_time_component("tomorrow 15:00"));
        assert!(has_time_component("tomorrow noon"));
        assert!(has_time_component("friday midnight"));
        assert!(has_time_component("tomorrow at 3"));
    }

    #[test]
    fn no_time_component() {
        assert!(!has_time_component("tomorrow"));
        assert!(!has_time_component("march 20"));
        assert!(!has_time_component("next friday"));
    }

    #[test]
    fn no_false_positive_am_in_words() {
        // "am" inside words like "camp" shouldn't match
        assert!(!has_time_component("december"));
        assert!(!has_time_component("camp"));
    }

    // --- expand_abbreviations ---

    #[test]
    fn expand_day_and_month_abbreviations() {
        assert_eq!(expand_abbreviations("sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("thu noon"), "thursday noon");
        assert_eq!(expand_abbreviations("jan 20"), "january 20");
        assert_eq!(expand_abbreviations("sept 5"), "september 5");
    }

    #[test]
    fn expand_preserves_non_abbreviations() {
        assert_eq!(expand_abbreviations("tomorrow 6pm"), "tomorrow 6pm");
        assert_eq!(expand_abbreviations("next friday"), "next friday");
    }

    // --- parse_interval ---

    #[test]
    fn interval_named_frequencies() {
        assert_eq!(parse_interval("daily").unwrap(), ComponentDelta::days(1));
        assert_eq!(parse_interval("Weekly").unwrap(), ComponentDelta::weeks(1));
        assert_eq!(parse_interval("monthly").unwrap(), ComponentDelta::months(1));
        assert_eq!(parse_interval("yearly").unwrap(), ComponentDelta::years(1));
        assert_eq!(parse_interval("biweekly").unwrap(), ComponentDelta::weeks(2));
    }

    #[test]
    fn interval_count_and_unit() {
        assert_eq!(parse_interval("2 weeks").unwrap(), ComponentDelta::weeks(2));
        assert_eq!(parse_interval("3 days").unwrap(), ComponentDelta::days(3));
        assert_eq!(parse_interval("1 month").unwrap(), ComponentDelta::months(1));
        assert_eq!(parse_interval("90 minutes").unwrap(), ComponentDelta::minutes(90));
    }

    #[test]
    fn interval_fused_and_short_units() {
        assert_eq!(parse_interval("2w").unwrap(), ComponentDelta::weeks(2));
        assert_eq!(parse_interval("10d").unwrap(), ComponentDelta::days(10));
        assert_eq!(parse_interval("6mo").unwrap(), ComponentDelta::months(6));
        assert_eq!(parse_interval("45m").unwrap(), ComponentDelta::minutes(45));
    }

    #[test]
    fn interval_bare_unit_means_one() {
        assert_eq!(parse_interval("week").unwrap(), ComponentDelta::weeks(1));
        assert_eq!(parse_interval("every day").unwrap(), ComponentDelta::days(1));
    }

    #[test]
    fn interval_compound() {
        let delta = parse_interval("1 month 3 days").unwrap();
        assert_eq!(delta.months, Some(1));
        assert_eq!(delta.days, Some(3));
    }

    #[test]
    fn interval_raw_iso8601() {
        assert_eq!(parse_interval("P2W").unwrap(), ComponentDelta::weeks(2));
        assert_eq!(parse_interval("p1m").unwrap(), ComponentDelta::months(1));
    }

    #[test]
    fn interval_rejects_garbage() {
        assert!(parse_interval("whenever").is_err());
        assert!(parse_interval("2 lightyears").is_err());
        assert!(parse_interval("").is_err());
        assert!(parse_interval("3").is_err());
    }

    // --- parse_until ---

    #[test]
    fn until_iso_date() {
        assert_eq!(
            parse_until("2026-12-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap()
        );
    }

    #[test]
    fn until_natural_language() {
        let date = parse_until("march 20").unwrap();
        assert_eq!(date.month(), 3);
        assert_eq!(date.day(), 20);
    }

    // --- parse_reminder ---

    #[test]
    fn reminder_durations() {
        assert_eq!(parse_reminder("30m").unwrap(), Reminder::minutes_before(30));
        assert_eq!(parse_reminder("2h").unwrap(), Reminder::hours_before(2));
        assert_eq!(parse_reminder("1day").unwrap(), Reminder::days_before(1));
    }

    #[test]
    fn reminder_at_due() {
        assert_eq!(parse_reminder("due").unwrap(), Reminder::at_time_of_due());
    }

    #[test]
    fn reminder_rejects_sub_minute_and_garbage() {
        assert!(parse_reminder("90s").is_err());
        assert!(parse_reminder("soonish").is_err());
    }
}
