//! Due-date parsing and display helpers.

use chrono::{Datelike, Duration, NaiveDate};

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "friday", "next monday", "this fri"
/// - "end of week", "end of month"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD" format
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => {
            let (_, end) = start_end_of_week(today);
            return Some(end);
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let (unit_at, _) = rest.char_indices().last()?;
        let (amount, unit) = rest.split_at(unit_at);
        let amount: i64 = amount.trim().parse().ok()?;
        let offset = match unit {
            "d" => Duration::try_days(amount)?,
            "w" => Duration::try_weeks(amount)?,
            // Months are approximated as 30 days.
            "m" => Duration::try_days(amount.checked_mul(30)?)?,
            _ => return None,
        };
        // Offsets past chrono's date range are rejected.
        return today.checked_add_signed(offset);
    }

    let (next_week, day) = if let Some(day) = s.strip_prefix("next ") {
        (true, day)
    } else if let Some(day) = s.strip_prefix("this ") {
        (false, day)
    } else {
        (false, s.as_str())
    };
    if let Some(target) = weekday_index(day) {
        let current = today.weekday().num_days_from_monday() as i64;
        let ahead = (target + 7 - current) % 7;
        let ahead = if next_week { ahead + 7 } else { ahead };
        return Some(today + Duration::days(ahead));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<i64> {
    let index = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(index)
}

/// Start and end of the ISO week (Monday to Sunday) containing `today`.
pub fn start_end_of_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Card label for a due date: "Today", "Tomorrow", "Overdue" or "Mar 4".
pub fn format_due(due: NaiveDate, today: NaiveDate) -> String {
    let delta = (due - today).num_days();
    match delta {
        0 => "Today".into(),
        1 => "Tomorrow".into(),
        d if d < 0 => "Overdue".into(),
        _ => due.format("%b %-d").to_string(),
    }
}
