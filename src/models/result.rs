//! Scrape outcome and its metadata.

use serde::{Deserialize, Serialize};

use super::event::CalendarEvent;

/// Filters and addressing resolved for one scrape, echoed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFilters {
    /// Resolved ISO year.
    pub year: i32,
    /// Resolved ISO week label, e.g. `W32`.
    pub week: String,
    pub currency: Option<String>,
    pub impact: Option<String>,
}

/// Successful scrape: the filtered events in DOM document order plus
/// capture metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub events: Vec<CalendarEvent>,
    pub filters_applied: AppliedFilters,
    /// Number of attempts consumed, including the successful one.
    pub attempts: u32,
    /// RFC 3339 capture time.
    pub scraped_at: String,
    /// Week-qualified URL the events were scraped from.
    pub source: String,
}
