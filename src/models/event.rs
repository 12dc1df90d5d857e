//! Canonical event record produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// One economic-calendar event as displayed on the target site.
///
/// Field values are the raw displayed text except for `importance`
/// (normalized) and `timestamp` (derived). Records are created fresh on
/// every scrape; none persist across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Calendar date the event is scheduled on, `YYYY-MM-DD`.
    pub date: String,
    /// Time-of-day label as displayed. May be the literal "All Day" or empty.
    pub time: String,
    /// Currency/region code associated with the event. Possibly empty.
    pub currency: String,
    /// Event title. Always non-empty and at least 3 characters; rows failing
    /// this are dropped during extraction, never emitted as partial records.
    pub event_name: String,
    /// Normalized impact label: `High`, `Medium`, `Low`, `Unknown`, or the
    /// verbatim site label when unrecognized but present.
    pub importance: String,
    /// Observed value as displayed. May be empty.
    pub actual: String,
    /// Expected value as displayed. May be empty.
    pub forecast: String,
    /// Prior value as displayed. May be empty.
    pub previous: String,
    /// Seconds since the Unix epoch (UTC) for (date, time), falling back to
    /// the capture wall-clock time when derivation fails.
    pub timestamp: i64,
    /// RFC 3339 capture time, stamped once when the record is produced.
    pub scraped_at: String,
}

/// Numeric month for a three-letter month abbreviation.
pub fn month_number(name: &str) -> Option<u32> {
    match name {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}
