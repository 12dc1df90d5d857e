//! Post-extraction filter predicates.

use serde::{Deserialize, Serialize};

/// Optional currency and impact predicates, applied after the full event
/// sequence is materialized. Both fields are comma-separated lists exactly
/// as received from the query string; absent filters are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub currency: Option<String>,
    pub impact: Option<String>,
}

impl FilterSpec {
    pub fn new(currency: Option<String>, impact: Option<String>) -> Self {
        Self { currency, impact }
    }

    pub fn is_empty(&self) -> bool {
        self.currency.is_none() && self.impact.is_none()
    }
}
