//! Headless-Chrome implementation of the browser capability.

use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions, Tab};
use log::debug;

use super::{BrowserError, BrowserSession, Locator, SessionFactory};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Launch configuration for Chrome sessions.
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    pub window_size: (u32, u32),
    pub user_agent: String,
    /// Default timeout for navigation and element waits.
    pub page_load_timeout: Duration,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            window_size: (1920, 1080),
            user_agent: USER_AGENT.to_string(),
            page_load_timeout: Duration::from_secs(30),
        }
    }
}

/// Session factory launching one headless Chrome process per session.
///
/// Each session owns its own browser process, so concurrent scrapes never
/// share state. The process is killed when the session drops.
pub struct ChromeDriver {
    config: ChromeConfig,
}

impl ChromeDriver {
    pub fn new(config: ChromeConfig) -> Self {
        Self { config }
    }
}

/// Chrome command-line arguments for one session, borrowing the formatted
/// user-agent flag.
fn launch_args(user_agent_flag: &str) -> Vec<&OsStr> {
    [
        user_agent_flag,
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--disable-extensions",
        "--disable-logging",
        "--disable-web-security",
        "--allow-running-insecure-content",
    ]
    .into_iter()
    .map(OsStr::new)
    .collect()
}

impl SessionFactory for ChromeDriver {
    fn session(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let user_agent = format!("--user-agent={}", self.config.user_agent);
        let args = launch_args(&user_agent);

        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some(self.config.window_size))
            .args(args)
            .build()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| BrowserError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        tab.set_default_timeout(self.config.page_load_timeout);
        debug!("chrome session started");

        Ok(Box::new(ChromeSession {
            // Keeps the browser process alive for the lifetime of the session.
            _browser: browser,
            tab,
        }))
    }
}

struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl BrowserSession for ChromeSession {
    fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map(|_| ())
            .map_err(|e| BrowserError::Navigation(e.to_string()))
    }

    fn page_source(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::Content(e.to_string()))
    }

    fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        let found = match locator {
            Locator::Css(s) => self.tab.wait_for_element_with_custom_timeout(s, timeout),
            Locator::XPath(s) => self.tab.wait_for_xpath_with_custom_timeout(s, timeout),
        };
        found
            .map(|_| ())
            .map_err(|_| BrowserError::ElementNotFound(locator.to_string()))
    }

    fn click(&self, locator: &Locator, timeout: Duration) -> Result<(), BrowserError> {
        let element = match locator {
            Locator::Css(s) => self.tab.wait_for_element_with_custom_timeout(s, timeout),
            Locator::XPath(s) => self.tab.wait_for_xpath_with_custom_timeout(s, timeout),
        }
        .map_err(|_| BrowserError::ElementNotFound(locator.to_string()))?;
        element
            .click()
            .map(|_| ())
            .map_err(|e| BrowserError::Interaction(e.to_string()))
    }
}
