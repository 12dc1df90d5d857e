//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

pub use crate::models::{AppliedFilters, CalendarEvent};

/// Query parameters for `GET /calendar`.
///
/// `year` and `week` arrive as raw strings so validation errors produce the
/// API's own 400 responses instead of axum's generic rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<String>,
    pub week: Option<String>,
    pub currency: Option<String>,
    pub impact: Option<String>,
}

/// Response body for `GET /calendar`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub success: bool,
    pub total_events: usize,
    pub events: Vec<CalendarEvent>,
    pub filters_applied: AppliedFilters,
    pub scraped_at: String,
    pub source: String,
}

/// One entry of the `GET /weeks` window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekInfo {
    pub year: i32,
    pub week: u32,
    pub display: String,
    pub date_range: String,
    pub url: String,
    pub is_current: bool,
}

/// Response body for `GET /weeks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeksResponse {
    pub available_weeks: Vec<WeekInfo>,
    pub current_week: String,
    pub total_weeks: usize,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub webdriver_status: String,
}
