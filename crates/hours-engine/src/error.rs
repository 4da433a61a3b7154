//! Error types for hours-engine operations.
//!
//! These errors are internal to the engine's building blocks. The public
//! availability functions never surface them: every failure there collapses
//! to [`AvailabilityVerdict::Unknown`](crate::AvailabilityVerdict::Unknown).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoursError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid day range: {0}")]
    InvalidDayRange(String),

    #[error("Malformed clause: {0}")]
    MalformedClause(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),

    #[error("No sunset: {0}")]
    NoSunset(String),
}

pub type Result<T> = std::result::Result<T, HoursError>;
