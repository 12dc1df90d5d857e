//! Timestamp derivation for event records.

use chrono::{DateTime, NaiveDate, Utc};

/// Sentinel label the site uses for date-scoped events.
pub const ALL_DAY: &str = "All Day";

/// Epoch seconds (UTC) for an event's date and displayed time label.
///
/// An empty label or the "All Day" sentinel resolves to midnight. Otherwise
/// the label is parsed as `HH[:MM]` (minute optional, defaulting to 0).
///
/// Any failure — non-numeric hour, malformed minute, out-of-range time,
/// invalid date — returns `now` instead of an error. Callers treat the
/// timestamp as always present, so a malformed label degrades to the capture
/// time rather than dropping the whole record. Preserve this fallback.
pub fn event_timestamp(
    year: i32,
    month: u32,
    day: u32,
    time_label: &str,
    now: DateTime<Utc>,
) -> i64 {
    event_datetime(year, month, day, time_label)
        .map(|dt| dt.timestamp())
        .unwrap_or_else(|| now.timestamp())
}

fn event_datetime(year: i32, month: u32, day: u32, time_label: &str) -> Option<DateTime<Utc>> {
    let (hour, minute) = if time_label.is_empty() || time_label == ALL_DAY {
        (0, 0)
    } else {
        parse_time_label(time_label)?
    };
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, 0)
        .map(|dt| dt.and_utc())
}

fn parse_time_label(label: &str) -> Option<(u32, u32)> {
    let mut parts = label.splitn(2, ':');
    let hour = parts.next()?.trim().parse().ok()?;
    let minute = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 0,
    };
    Some((hour, minute))
}
