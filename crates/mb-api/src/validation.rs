use chrono::{DateTime, NaiveDate};
use uuid::Uuid;

use crate::error::ApiError;

/// Inclusive bounds of a topic's progress percentage
pub const PROGRESS_RANGE: std::ops::RangeInclusive<i32> = 0..=100;

/// Trim a text field and treat blank input as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reject progress values outside 0..=100. Values are never clamped.
///
/// # Examples
/// ```
/// use mb_api::validation::validate_progress;
///
/// assert!(validate_progress(100).is_ok());
/// assert!(validate_progress(101).is_err());
/// ```
pub fn validate_progress(progress: i32) -> Result<i32, ApiError> {
    if !PROGRESS_RANGE.contains(&progress) {
        return Err(ApiError::Validation(format!(
            "Progress must be between 0 and 100, got {progress}"
        )));
    }
    Ok(progress)
}

/// Parse a resource id from a path segment.
///
/// A malformed id cannot name an existing record, so it is reported exactly
/// like a missing one.
pub fn parse_resource_id(raw: &str, resource: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{resource} not found")))
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Serde adapter for optional dates accepting the formats of [`parse_date`].
///
/// Blank strings deserialize to `None` so they fail the "required" check
/// instead of the format check.
pub mod optional_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        super::parse_date(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid date '{raw}', expected YYYY-MM-DD")))
    }
}
