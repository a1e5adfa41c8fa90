// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised while turning request input into domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A single named field was absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Several fields are required together; the message is reported verbatim.
    #[error("{0}")]
    MissingFields(&'static str),
    /// A date did not match `YYYY-MM-DD`.
    #[error("invalid date for {field}: '{value}' (expected YYYY-MM-DD)")]
    InvalidDateFormat { field: &'static str, value: String },
    /// A time did not match `HH:MM` or `HH:MM:SS`.
    #[error("invalid time for {field}: '{value}' (expected HH:MM or HH:MM:SS)")]
    InvalidTimeFormat { field: &'static str, value: String },
    /// An appointment status outside the allowed set.
    #[error("invalid appointment status '{0}' (expected pending, Confirmed, Completed or Cancelled)")]
    InvalidStatus(String),
    /// A lab test category that has no result table.
    #[error("Invalid test type")]
    InvalidTestType(String),
    /// A quantity that must not drop below zero.
    #[error("{0} must not be negative")]
    Negative(&'static str),
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
