//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::services::ScrapeError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Last attempt's fault when a scrape exhausted its retry budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            last_error: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Scrape pipeline exhausted its retry budget
    Scrape(ScrapeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(msg)),
            AppError::Scrape(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError {
                    error: format!("Failed to scrape after {} attempts", e.attempts),
                    last_error: Some(e.last_error),
                },
            ),
        };
        (status, Json(error)).into_response()
    }
}

impl From<ScrapeError> for AppError {
    fn from(e: ScrapeError) -> Self {
        AppError::Scrape(e)
    }
}
