//! Shared browser stubs for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use econcal::browser::{BrowserError, BrowserSession, Locator, SessionFactory};

/// Factory handing out sessions that serve a fixed document. The first
/// `failing_navigations` sessions fail their `navigate` call; every session
/// bumps the shared release counter when dropped.
pub struct FlakyFactory {
    html: String,
    failing_navigations: AtomicUsize,
    created: AtomicUsize,
    released: Arc<AtomicUsize>,
}

impl FlakyFactory {
    pub fn new(html: impl Into<String>, failing_navigations: usize) -> Self {
        Self {
            html: html.into(),
            failing_navigations: AtomicUsize::new(failing_navigations),
            created: AtomicUsize::new(0),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn sessions_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn sessions_released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl SessionFactory for FlakyFactory {
    fn session(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        let fail_navigation = self
            .failing_navigations
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        Ok(Box::new(StubSession {
            html: self.html.clone(),
            fail_navigation,
            released: self.released.clone(),
        }))
    }
}

pub struct StubSession {
    html: String,
    fail_navigation: bool,
    released: Arc<AtomicUsize>,
}

impl BrowserSession for StubSession {
    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        if self.fail_navigation {
            Err(BrowserError::Navigation(format!("timed out loading {url}")))
        } else {
            Ok(())
        }
    }

    fn page_source(&self) -> Result<String, BrowserError> {
        Ok(self.html.clone())
    }

    fn wait_for(&self, _locator: &Locator, _timeout: Duration) -> Result<(), BrowserError> {
        Ok(())
    }

    fn click(&self, locator: &Locator, _timeout: Duration) -> Result<(), BrowserError> {
        // No interactive controls in the synthetic pages.
        Err(BrowserError::ElementNotFound(locator.to_string()))
    }
}

impl Drop for StubSession {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
