//! Shared output types for the dashboard metrics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Badge level attached to a derived metric.
///
/// The rendering layer maps these onto its own colors; the metrics layer only
/// decides which bucket a value falls into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Pick `Danger` when the flag is raised, `Success` otherwise.
    pub fn flag(raised: bool) -> Self {
        if raised {
            Severity::Danger
        } else {
            Severity::Success
        }
    }
}

/// API response wrapper used by the CLI output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<crate::Result<T>> for ApiResponse<T> {
    fn from(result: crate::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Round a currency amount to cents.
///
/// Rounds the exact decimal value of the double, so 0.015 (stored just below
/// the half cent) becomes 0.01.
pub(crate) fn round_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Collect `(id, metrics)` pairs into a map, warning when an id repeats.
///
/// The last entity with a given id wins.
pub(crate) fn collect_by_id<T>(
    entries: impl IntoIterator<Item = (String, T)>,
    kind: &str,
) -> BTreeMap<String, T> {
    let mut map = BTreeMap::new();
    for (id, metrics) in entries {
        if map.insert(id.clone(), metrics).is_some() {
            tracing::warn!(kind, id = %id, "Duplicate id, keeping the last entry");
        }
    }
    map
}
