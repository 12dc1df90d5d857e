//! ISO week addressing for the calendar page.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Addressing key for one calendar week: ISO year plus ISO week number
/// (1-53). Threads through extraction as context; not stored on events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSelector {
    pub year: i32,
    pub week: u32,
}

impl WeekSelector {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// Selector for the ISO week containing `now`.
    pub fn current(now: DateTime<Utc>) -> Self {
        let iso = now.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    /// Value of the page's `week` query parameter, e.g. `2025-W07`.
    pub fn query_value(&self) -> String {
        format!("{}-W{:02}", self.year, self.week)
    }

    /// Two-digit week label, e.g. `W07`.
    pub fn label(&self) -> String {
        format!("W{:02}", self.week)
    }
}

/// One entry of the week window served by `/weeks`: the selector plus the
/// Monday-Friday span of that week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan {
    pub selector: WeekSelector,
    pub monday: NaiveDate,
    pub friday: NaiveDate,
    pub is_current: bool,
}

/// Enumerate the fixed window of ISO weeks around `now`: two weeks before
/// the current one through four after.
pub fn surrounding_weeks(now: DateTime<Utc>) -> Vec<WeekSpan> {
    (-2..5)
        .map(|offset| {
            let target = now + Duration::weeks(offset);
            let monday = (target
                - Duration::days(target.weekday().num_days_from_monday() as i64))
            .date_naive();
            WeekSpan {
                selector: WeekSelector::current(target),
                monday,
                friday: monday + Duration::days(4),
                is_current: offset == 0,
            }
        })
        .collect()
}
