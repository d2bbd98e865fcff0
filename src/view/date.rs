//! Smart date labels for list rows.
//!
//! Timestamps arrive as opaque strings (IMAP header dates in practice) and
//! are compressed into the shortest label that still orients the reader:
//! today shows a clock time, yesterday the word "Yesterday", the current
//! year a short day-month, and anything older a full numeric date.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone};

/// Formats a raw timestamp string relative to the current local time.
///
/// Unparseable input falls back to the substring before the first comma
/// (the weekday prefix of an RFC 2822-ish string), or an empty string when
/// there is no comma to split on.
pub fn format_smart_date(raw: &str) -> String {
    format_smart_date_at(raw, Local::now())
}

/// Like [`format_smart_date`] with an injected "now", for deterministic tests.
pub fn format_smart_date_at(raw: &str, now: DateTime<Local>) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_date(raw) {
        Some(date) => smart_label(date, now),
        None => raw
            .split_once(',')
            .map(|(head, _)| head.to_string())
            .unwrap_or_default(),
    }
}

/// Parses the timestamp formats the backend is known to forward.
fn parse_date(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Local));
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Local));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Local.from_local_datetime(&naive).single();
        }
    }
    None
}

/// The calendar bucketing rule, on already-parsed local times.
pub fn smart_label(date: DateTime<Local>, now: DateTime<Local>) -> String {
    let today = now.date_naive();
    let message_day = date.date_naive();

    if message_day == today {
        return date.format("%H:%M").to_string();
    }
    if today.pred_opt() == Some(message_day) {
        return "Yesterday".to_string();
    }
    if message_day.year() == today.year() {
        return date.format("%-d %b").to_string();
    }
    date.format("%d/%m/%Y").to_string()
}
