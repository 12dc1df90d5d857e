//! Browser automation capability.
//!
//! The pipeline needs only a small slice of a browser: navigate to a URL,
//! wait for an element, click an element, and snapshot the rendered markup.
//! That surface is the [`BrowserSession`] trait, so the orchestrator and the
//! interaction sequencer can be exercised against stubs. The production
//! implementation in [`chrome`] drives a headless Chrome process.

#[cfg(feature = "chrome-driver")]
pub mod chrome;

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Failures surfaced by the browser capability.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    Launch(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("interaction failed: {0}")]
    Interaction(String),
    #[error("failed to capture page source: {0}")]
    Content(String),
}

/// Structural locator for a page element.
///
/// All locators used by the pipeline are fixed literals describing the two
/// known skins of the target page, hence the `'static` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    Css(&'static str),
    XPath(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{s}`"),
            Locator::XPath(s) => write!(f, "xpath `{s}`"),
        }
    }
}

/// One live browser session.
///
/// Dropping the value releases the underlying browser; release faults are
/// swallowed. Sessions are never shared or pooled: each scrape attempt owns
/// exactly one from acquisition to drop.
pub trait BrowserSession: Send {
    /// Navigate to `url`, bounded by the session's page-load timeout.
    fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Current rendered markup as a string.
    fn page_source(&self) -> Result<String, BrowserError>;

    /// Wait until an element matching `locator` is present.
    fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;

    /// Wait for an element matching `locator`, then click it.
    fn click(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError>;
}

/// Creates an independent [`BrowserSession`] per scrape attempt.
pub trait SessionFactory: Send + Sync {
    fn session(&self) -> Result<Box<dyn BrowserSession>, BrowserError>;
}
