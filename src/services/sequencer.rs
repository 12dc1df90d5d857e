//! Session interaction choreography.
//!
//! Before the snapshot is taken, the page has to be driven into week view
//! and, ideally, a fixed timezone. The target site ships two DOM skins that
//! differ only in the body-level `div` index of their element paths, so the
//! same logical controls are described once per skin as a [`LayoutStrategy`]
//! and tried in fixed priority order. Everything here is best-effort: the
//! scrape can still proceed against whatever server-rendered content is
//! present, so no sub-step failure ever reaches the caller.

use std::time::Duration;

use log::debug;

use crate::browser::{BrowserSession, Locator};

const BODY_READY_TIMEOUT: Duration = Duration::from_secs(10);
const WEEK_BUTTON_TIMEOUT: Duration = Duration::from_secs(5);
const TIMEZONE_STEP_TIMEOUT: Duration = Duration::from_secs(3);

/// Locators for the logical controls of one known DOM skin.
#[derive(Debug, Clone, Copy)]
pub struct LayoutStrategy {
    pub name: &'static str,
    pub week_button: Locator,
    pub timezone_button: Locator,
    /// Entry 13 of the timezone menu's option list.
    pub timezone_option: Locator,
}

/// The two known skins, in priority order.
pub const KNOWN_LAYOUTS: &[LayoutStrategy] = &[
    LayoutStrategy {
        name: "primary",
        week_button: Locator::XPath(
            "/html/body/div[2]/div[2]/section[2]/div/div/div[1]/div/div[2]/div[2]/button[1]",
        ),
        timezone_button: Locator::XPath(
            "/html/body/div[2]/div[2]/section[2]/div/div/div[1]/div/div[2]/div[1]/button",
        ),
        timezone_option: Locator::XPath(
            "/html/body/div[2]/div[2]/section[2]/div/div/div[1]/div/div[2]/div[1]/ol/li[13]/div",
        ),
    },
    LayoutStrategy {
        name: "alternate",
        week_button: Locator::XPath(
            "/html/body/div[1]/div[2]/section[2]/div/div/div[1]/div/div[2]/div[2]/button[1]",
        ),
        timezone_button: Locator::XPath(
            "/html/body/div[1]/div[2]/section[2]/div/div/div[1]/div/div[2]/div[1]/button",
        ),
        timezone_option: Locator::XPath(
            "/html/body/div[1]/div[2]/section[2]/div/div/div[1]/div/div[2]/div[1]/ol/li[13]/div",
        ),
    },
];

/// Drive the page into week view and select the designated timezone entry.
///
/// Strategies are tried in order; the first one whose week-view click
/// succeeds wins, and the timezone sub-sequence is then attempted under the
/// same skin, independently fail-safe. Afterwards the session settles for
/// `settle_delay` so asynchronous content can finish loading. Never fails
/// the caller.
pub fn prepare_view(
    session: &dyn BrowserSession,
    layouts: &[LayoutStrategy],
    settle_delay: Duration,
) {
    if let Err(e) = session.wait_for(&Locator::Css("body"), BODY_READY_TIMEOUT) {
        debug!("body readiness wait failed: {e}");
    }

    for layout in layouts {
        match session.click(&layout.week_button, WEEK_BUTTON_TIMEOUT) {
            Ok(()) => {
                debug!("week view selected ({} layout)", layout.name);
                select_timezone(session, layout);
                break;
            }
            Err(e) => debug!("week button unavailable ({} layout): {e}", layout.name),
        }
    }

    std::thread::sleep(settle_delay);
}

fn select_timezone(session: &dyn BrowserSession, layout: &LayoutStrategy) {
    if let Err(e) = session.click(&layout.timezone_button, TIMEZONE_STEP_TIMEOUT) {
        debug!("timezone menu skipped ({} layout): {e}", layout.name);
        return;
    }
    if let Err(e) = session.click(&layout.timezone_option, TIMEZONE_STEP_TIMEOUT) {
        debug!("timezone option skipped ({} layout): {e}", layout.name);
    }
}
