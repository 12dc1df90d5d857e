//! The extraction pipeline and scrape orchestration.
//!
//! Leaves first: [`clock`] and [`timestamp`] are pure time utilities,
//! [`normalize`] maps raw impact labels onto a closed set, [`extract`] turns
//! a DOM snapshot into event records, [`filter`] applies the post-extraction
//! predicates, [`sequencer`] drives the page into the right view, and
//! [`scraper`] owns the retry loop and session lifecycle around all of it.

pub mod clock;
pub mod extract;
pub mod filter;
pub mod normalize;
pub mod scraper;
pub mod sequencer;
pub mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::apply_filters;
pub use scraper::{CalendarScraper, ScrapeError, ScraperConfig};
