//! Router configuration for the HTTP API.
//!
//! Sets up the routes and middleware (CORS, compression, tracing) and
//! produces the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home))
        .route("/calendar", get(handlers::get_calendar))
        .route("/weeks", get(handlers::get_weeks))
        .route("/health", get(handlers::health_check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::browser::{BrowserError, BrowserSession, SessionFactory};
    use crate::services::{CalendarScraper, ScraperConfig};

    struct NoSessionFactory;

    impl SessionFactory for NoSessionFactory {
        fn session(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
            Err(BrowserError::Launch("no chrome in tests".to_string()))
        }
    }

    #[test]
    fn test_router_creation() {
        let scraper =
            CalendarScraper::new(ScraperConfig::default(), Arc::new(NoSessionFactory));
        let state = AppState::new(Arc::new(scraper));
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
