//! Scrape orchestration.
//!
//! Owns the retry loop around single attempts: acquire a session, navigate,
//! validate page viability, run the interaction sequence, snapshot, extract,
//! filter. Attempts run strictly sequentially; each exclusively owns one
//! browser session, released when the handle drops on every exit path.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;

use crate::browser::{BrowserError, SessionFactory};
use crate::models::{AppliedFilters, CalendarEvent, FilterSpec, ScrapeResult, WeekSelector};

use super::clock::{Clock, SystemClock};
use super::extract::extract_document;
use super::filter::apply_filters;
use super::sequencer::{prepare_view, KNOWN_LAYOUTS};

/// Terminal scrape failure: every attempt in the retry budget failed.
#[derive(Debug, Clone, Error)]
#[error("failed to scrape after {attempts} attempts: {last_error}")]
pub struct ScrapeError {
    pub attempts: u32,
    pub last_error: String,
}

/// Per-attempt failure, consumed by the retry loop.
#[derive(Debug, Error)]
enum AttemptError {
    #[error("session acquisition failed: {0}")]
    Session(BrowserError),
    #[error("navigation failed: {0}")]
    Navigation(BrowserError),
    #[error("page source unavailable: {0}")]
    Snapshot(BrowserError),
    #[error("document too short ({length} chars)")]
    UndersizedDocument { length: usize },
}

/// Explicit configuration for the orchestrator; there is no process-global
/// scraper state.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Calendar page URL, addressed per week via the `week` query parameter.
    pub calendar_url: String,
    /// Attempt budget per scrape invocation.
    pub max_retries: u32,
    /// Minimal viable document length; anything shorter is a blank or error
    /// page and fails the attempt without inspecting structure.
    pub min_document_len: usize,
    /// Settle interval after the interaction sequence.
    pub settle_delay: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            calendar_url: "https://www.babypips.com/economic-calendar".to_string(),
            max_retries: 3,
            min_document_len: 200,
            settle_delay: Duration::from_secs(2),
        }
    }
}

/// The scrape orchestrator.
pub struct CalendarScraper {
    config: ScraperConfig,
    sessions: Arc<dyn SessionFactory>,
    clock: Arc<dyn Clock>,
}

impl CalendarScraper {
    pub fn new(config: ScraperConfig, sessions: Arc<dyn SessionFactory>) -> Self {
        Self::with_clock(config, sessions, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: ScraperConfig,
        sessions: Arc<dyn SessionFactory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            sessions,
            clock,
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Acquire and release one browser session. Used by the health check.
    pub fn probe_session(&self) -> Result<(), BrowserError> {
        self.sessions.session().map(drop)
    }

    /// Scrape one week of the calendar, retrying failed attempts up to the
    /// configured budget.
    ///
    /// `week` defaults to the current ISO week. Retry exhaustion is returned
    /// as a [`ScrapeError`] value carrying the last attempt's fault; it never
    /// panics past this boundary.
    pub fn scrape(
        &self,
        week: Option<WeekSelector>,
        filters: &FilterSpec,
    ) -> Result<ScrapeResult, ScrapeError> {
        let week = week.unwrap_or_else(|| WeekSelector::current(self.clock.now()));
        let url = format!("{}?week={}", self.config.calendar_url, week.query_value());
        info!("scraping {url}");

        let mut last_error = String::from("no attempts made");
        for attempt in 1..=self.config.max_retries {
            debug!("attempt {attempt}/{}", self.config.max_retries);
            match self.attempt(&url, week) {
                Ok(events) => {
                    let events = apply_filters(events, filters);
                    info!(
                        "attempt {attempt} succeeded: {} events after filtering",
                        events.len()
                    );
                    return Ok(ScrapeResult {
                        events,
                        filters_applied: AppliedFilters {
                            year: week.year,
                            week: week.label(),
                            currency: filters.currency.clone(),
                            impact: filters.impact.clone(),
                        },
                        attempts: attempt,
                        scraped_at: self.clock.now().to_rfc3339(),
                        source: url,
                    });
                }
                Err(e) => {
                    warn!("attempt {attempt}/{} failed: {e}", self.config.max_retries);
                    last_error = e.to_string();
                }
            }
        }

        Err(ScrapeError {
            attempts: self.config.max_retries,
            last_error,
        })
    }

    /// One attempt against a fresh session. The session is released when the
    /// handle drops, on success and on every error path alike.
    fn attempt(&self, url: &str, week: WeekSelector) -> Result<Vec<CalendarEvent>, AttemptError> {
        let session = self.sessions.session().map_err(AttemptError::Session)?;

        session.navigate(url).map_err(AttemptError::Navigation)?;

        let length = session
            .page_source()
            .map_err(AttemptError::Snapshot)?
            .len();
        debug!("page loaded, source length: {length}");
        if length < self.config.min_document_len {
            return Err(AttemptError::UndersizedDocument { length });
        }

        prepare_view(session.as_ref(), KNOWN_LAYOUTS, self.config.settle_delay);

        let html = session.page_source().map_err(AttemptError::Snapshot)?;
        debug!("final page source length: {}", html.len());

        Ok(extract_document(&html, week, self.clock.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    use crate::services::clock::FixedClock;

    fn config() -> ScraperConfig {
        ScraperConfig {
            settle_delay: Duration::ZERO,
            ..ScraperConfig::default()
        }
    }

    struct NoSessionFactory;

    impl SessionFactory for NoSessionFactory {
        fn session(&self) -> Result<Box<dyn crate::browser::BrowserSession>, BrowserError> {
            Err(BrowserError::Launch("chrome not installed".to_string()))
        }
    }

    #[test]
    fn test_session_acquisition_failure_exhausts_budget() {
        let scraper = CalendarScraper::new(config(), Arc::new(NoSessionFactory));
        let err = scraper
            .scrape(None, &FilterSpec::default())
            .expect_err("no session should ever be acquired");
        assert_eq!(err.attempts, 3);
        assert!(err.last_error.contains("session acquisition failed"));
    }

    /// Factory whose sessions serve a fixed document and record every
    /// navigated URL.
    struct FixedPageFactory {
        html: String,
        navigated: Arc<Mutex<Vec<String>>>,
    }

    struct FixedPageSession {
        html: String,
        navigated: Arc<Mutex<Vec<String>>>,
    }

    impl SessionFactory for FixedPageFactory {
        fn session(&self) -> Result<Box<dyn crate::browser::BrowserSession>, BrowserError> {
            Ok(Box::new(FixedPageSession {
                html: self.html.clone(),
                navigated: self.navigated.clone(),
            }))
        }
    }

    impl crate::browser::BrowserSession for FixedPageSession {
        fn navigate(&self, url: &str) -> Result<(), BrowserError> {
            self.navigated.lock().unwrap().push(url.to_string());
            Ok(())
        }

        fn page_source(&self) -> Result<String, BrowserError> {
            Ok(self.html.clone())
        }

        fn wait_for(
            &self,
            _locator: &crate::browser::Locator,
            _timeout: Duration,
        ) -> Result<(), BrowserError> {
            Ok(())
        }

        fn click(
            &self,
            locator: &crate::browser::Locator,
            _timeout: Duration,
        ) -> Result<(), BrowserError> {
            Err(BrowserError::ElementNotFound(locator.to_string()))
        }
    }

    #[test]
    fn test_default_week_comes_from_clock() {
        let navigated = Arc::new(Mutex::new(Vec::new()));
        let factory = FixedPageFactory {
            html: "x".repeat(300),
            navigated: navigated.clone(),
        };
        // 2024-12-30 falls in ISO week 1 of 2025.
        let clock = FixedClock(chrono::Utc.with_ymd_and_hms(2024, 12, 30, 0, 0, 0).unwrap());
        let scraper =
            CalendarScraper::with_clock(config(), Arc::new(factory), Arc::new(clock));

        let result = scraper.scrape(None, &FilterSpec::default()).unwrap();
        assert_eq!(result.attempts, 1);
        assert_eq!(result.filters_applied.year, 2025);
        assert_eq!(result.filters_applied.week, "W01");
        assert_eq!(
            navigated.lock().unwrap().as_slice(),
            ["https://www.babypips.com/economic-calendar?week=2025-W01"]
        );
    }

    #[test]
    fn test_undersized_document_fails_the_attempt() {
        let factory = FixedPageFactory {
            html: "tiny".to_string(),
            navigated: Arc::new(Mutex::new(Vec::new())),
        };
        let scraper = CalendarScraper::new(config(), Arc::new(factory));
        let err = scraper.scrape(None, &FilterSpec::default()).unwrap_err();
        assert!(err.last_error.contains("document too short"));
    }

    #[test]
    fn test_probe_session_reports_launch_failure() {
        let scraper = CalendarScraper::new(config(), Arc::new(NoSessionFactory));
        assert!(scraper.probe_session().is_err());
    }
}
