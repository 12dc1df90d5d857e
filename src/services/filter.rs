//! Post-extraction filter stage.

use crate::models::{CalendarEvent, FilterSpec};

/// Apply the optional currency and impact predicates to an event list.
///
/// Currency matching is a case-insensitive **substring** test against any
/// listed code ("USD" matches a currency field of "USD (US)"); impact
/// matching is a case-insensitive **exact** test against the normalized
/// importance. Both present means logical AND. Pure and idempotent:
/// filtering never mutates records and never affects parsing.
pub fn apply_filters(events: Vec<CalendarEvent>, filters: &FilterSpec) -> Vec<CalendarEvent> {
    let mut filtered = events;

    if let Some(csv) = &filters.currency {
        let wanted: Vec<String> = csv.split(',').map(|c| c.trim().to_uppercase()).collect();
        filtered.retain(|event| {
            let currency = event.currency.to_uppercase();
            wanted.iter().any(|code| currency.contains(code.as_str()))
        });
    }

    if let Some(csv) = &filters.impact {
        let wanted: Vec<String> = csv.split(',').map(|i| i.trim().to_lowercase()).collect();
        filtered.retain(|event| wanted.contains(&event.importance.to_lowercase()));
    }

    filtered
}
