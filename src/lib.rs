//! # Econcal
//!
//! Economic-calendar scraping service for babypips.com.
//!
//! This crate drives a headless browser to the babypips.com economic calendar,
//! extracts structured event records from the rendered HTML, normalizes and
//! filters them, and exposes the result through a small REST API built on Axum.
//!
//! ## Features
//!
//! - **Browser Automation**: Headless-Chrome sessions behind a small trait seam
//! - **Resilient Extraction**: Day-block/row extraction with documented fallbacks
//!   for both known DOM skins of the target site
//! - **Normalization**: Impact labels mapped to a closed set, timestamps derived
//!   with an explicit wall-clock fallback
//! - **Filtering**: Post-extraction currency and impact predicates
//! - **Retry Orchestration**: Bounded per-attempt retry with unconditional
//!   session teardown
//! - **HTTP API**: `/calendar`, `/weeks`, and `/health` endpoints
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (events, week addressing, filters, results)
//! - [`browser`]: Browser session capability and its Chrome implementation
//! - [`services`]: The extraction pipeline and scrape orchestration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod browser;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
