//! Input validation helpers shared by the service and HTTP layers.

use crate::error::CoreError;

/// Default page size for scan history listings.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

/// Upper bound on scan history page size.
pub const MAX_HISTORY_LIMIT: i64 = 200;

/// Require an optional string field to be present and not blank.
///
/// Returns the value unchanged, surrounding whitespace included. Use this
/// for values matched exactly against stored credentials.
pub fn require_non_blank<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Require an optional string field to be present and non-blank.
///
/// Returns the trimmed value. Use this for values being written.
pub fn require_present<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Trim an optional free-text field, treating blank as absent.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
