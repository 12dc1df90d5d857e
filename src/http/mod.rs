//! HTTP server module.
//!
//! Axum-based REST shell over the scrape pipeline:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Query parsing and validation                          │
//! │  - JSON serialization, CORS, compression, tracing        │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │ spawn_blocking
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Pipeline (services::scraper)                            │
//! │  - Retry loop, session lifecycle, extraction, filtering  │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Browser capability (browser::chrome)                    │
//! │  - One headless Chrome session per request               │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
