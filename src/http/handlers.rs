//! HTTP handlers for the REST API.
//!
//! Each handler validates its inputs and delegates to the scrape pipeline.
//! The pipeline is blocking (it owns a browser session end to end), so
//! handlers bridge onto the blocking thread pool.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::json;

use super::dto::{CalendarQuery, CalendarResponse, HealthResponse, WeekInfo, WeeksResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{surrounding_weeks, FilterSpec, WeekSelector};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// API documentation
// =============================================================================

/// GET /
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Economic Calendar Scraper API",
        "endpoints": {
            "/calendar": "GET - Scrape current week",
            "/calendar?year=2025&week=32": "GET - Scrape specific week",
            "/calendar?currency=USD,EUR": "GET - Filter by currencies",
            "/calendar?impact=high,medium": "GET - Filter by impact level",
            "/weeks": "GET - Get available weeks",
            "/health": "GET - Health check"
        },
        "examples": [
            "/calendar",
            "/calendar?year=2025&week=32",
            "/calendar?currency=USD,EUR&impact=high",
            "/calendar?year=2025&week=32&currency=USD&impact=high"
        ]
    }))
}

// =============================================================================
// Calendar
// =============================================================================

/// GET /calendar?year=&week=&currency=&impact=
pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> HandlerResult<CalendarResponse> {
    let week = parse_week_selector(&query)?;
    let filters = FilterSpec::new(query.currency, query.impact);

    let scraper = state.scraper.clone();
    let result = tokio::task::spawn_blocking(move || scraper.scrape(week, &filters))
        .await
        .map_err(|e| AppError::Internal(format!("scrape task failed: {e}")))??;

    Ok(Json(CalendarResponse {
        success: true,
        total_events: result.events.len(),
        events: result.events,
        filters_applied: result.filters_applied,
        scraped_at: result.scraped_at,
        source: result.source,
    }))
}

/// Week addressing from the raw query strings.
///
/// Both parameters must be present to override the default (current) week,
/// but each one present is validated regardless, matching the API contract:
/// 400 on a non-numeric year or a week outside 1-53.
fn parse_week_selector(query: &CalendarQuery) -> Result<Option<WeekSelector>, AppError> {
    let year = query
        .year
        .as_deref()
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| AppError::BadRequest("Year must be a number".to_string()))
        })
        .transpose()?;

    let week = query
        .week
        .as_deref()
        .map(|s| {
            s.parse::<u32>()
                .ok()
                .filter(|w| (1..=53).contains(w))
                .ok_or_else(|| {
                    AppError::BadRequest("Week must be a number between 1 and 53".to_string())
                })
        })
        .transpose()?;

    Ok(match (year, week) {
        (Some(year), Some(week)) => Some(WeekSelector::new(year, week)),
        _ => None,
    })
}

// =============================================================================
// Weeks window
// =============================================================================

/// GET /weeks
pub async fn get_weeks(State(state): State<AppState>) -> HandlerResult<WeeksResponse> {
    let now = state.scraper.clock().now();
    let current = WeekSelector::current(now);

    let available_weeks: Vec<WeekInfo> = surrounding_weeks(now)
        .into_iter()
        .map(|span| WeekInfo {
            year: span.selector.year,
            week: span.selector.week,
            display: format!("Week {}, {}", span.selector.week, span.selector.year),
            date_range: format!(
                "{} - {}",
                span.monday.format("%b %d"),
                span.friday.format("%b %d, %Y")
            ),
            url: format!(
                "/calendar?year={}&week={}",
                span.selector.year, span.selector.week
            ),
            is_current: span.is_current,
        })
        .collect();

    Ok(Json(WeeksResponse {
        total_weeks: available_weeks.len(),
        available_weeks,
        current_week: current.query_value(),
    }))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Attempts a browser session acquisition/release cycle and reports whether
/// the driver is working.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let scraper = state.scraper.clone();
    let probe = tokio::task::spawn_blocking(move || scraper.probe_session())
        .await
        .map_err(|e| AppError::Internal(format!("health probe failed: {e}")))?;

    let webdriver_status = match probe {
        Ok(()) => "working".to_string(),
        Err(e) => format!("failed: {e}"),
    };

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: state.scraper.clock().now().to_rfc3339(),
        webdriver_status,
    }))
}
