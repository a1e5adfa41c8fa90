// models/src/validation.rs

//! Presence and format checks applied to request input before it reaches storage.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::{ValidationError, ValidationResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Returns the trimmed value, or `MissingField` when it is absent or blank.
pub fn require(value: Option<String>, field: &'static str) -> ValidationResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Like [`require`] for numeric input.
pub fn require_number<T>(value: Option<T>, field: &'static str) -> ValidationResult<T> {
    value.ok_or(ValidationError::MissingField(field))
}

/// Parses a calendar date. Accepts `YYYY-MM-DD`, optionally followed by a
/// time part (`2024-05-01T10:00:00Z`), which is dropped.
pub fn parse_date(field: &'static str, value: &str) -> ValidationResult<NaiveDate> {
    let trimmed = value.trim();
    let date_part = match trimmed.get(..10) {
        Some(head) if trimmed.len() > 10 && matches!(trimmed.as_bytes()[10], b'T' | b' ') => head,
        _ => trimmed,
    };
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).map_err(|_| ValidationError::InvalidDateFormat {
        field,
        value: value.to_string(),
    })
}

/// Validates a date and renders it as `YYYY-MM-DD`.
pub fn normalize_date(field: &'static str, value: &str) -> ValidationResult<String> {
    parse_date(field, value).map(|d| d.format(DATE_FORMAT).to_string())
}

/// Validates a time of day (`HH:MM` or `HH:MM:SS`) and renders it as `HH:MM:SS`.
pub fn normalize_time(field: &'static str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map(|t| t.format(TIME_FORMAT).to_string())
        .map_err(|_| ValidationError::InvalidTimeFormat {
            field,
            value: value.to_string(),
        })
}
