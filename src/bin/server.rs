//! Economic Calendar Scraper HTTP Server
//!
//! Entry point for the REST API server. It wires the Chrome session factory
//! into the scrape orchestrator, sets up the HTTP router, and starts serving
//! requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin econcal-server
//! ```
//!
//! Requires a Chrome or Chromium binary on the host.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ECONCAL_BASE_URL`: Calendar page URL override
//! - `ECONCAL_MAX_RETRIES`: Scrape attempt budget (default: 3)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use econcal::browser::chrome::{ChromeConfig, ChromeDriver};
use econcal::http::{create_router, AppState};
use econcal::services::{CalendarScraper, ScraperConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Economic Calendar Scraper HTTP Server");

    // Scraper configuration, overridable from the environment
    let mut config = ScraperConfig::default();
    if let Ok(url) = env::var("ECONCAL_BASE_URL") {
        config.calendar_url = url;
    }
    if let Some(retries) = env::var("ECONCAL_MAX_RETRIES")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.max_retries = retries;
    }
    info!("Scrape target: {}", config.calendar_url);

    let driver = Arc::new(ChromeDriver::new(ChromeConfig::default()));
    let scraper = Arc::new(CalendarScraper::new(config, driver));

    // Create router with all endpoints
    let state = AppState::new(scraper);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
