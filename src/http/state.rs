//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::CalendarScraper;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Scrape orchestrator. Cheap to clone; each request still gets its own
    /// browser session.
    pub scraper: Arc<CalendarScraper>,
}

impl AppState {
    pub fn new(scraper: Arc<CalendarScraper>) -> Self {
        Self { scraper }
    }
}
