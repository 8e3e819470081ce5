//! Error types for slot-finder operations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// Input validation failures. The finder is a pure function, so every error is
/// raised before any computation starts and retrying with the same input is pointless.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    #[error("Invalid search range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid minimum duration: {0} minutes (must be at least 1)")]
    InvalidDuration(i64),

    #[error("Invalid working hours: start {start} is not before end {end}")]
    InvalidWorkingHours { start: NaiveTime, end: NaiveTime },

    #[error("Invalid interval: start {start} is not before end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid days-of-week filter: {0}")]
    InvalidDaysOfWeek(String),
}

pub type Result<T> = std::result::Result<T, FinderError>;
