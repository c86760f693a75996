//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Time is not `HH:MM`
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Date is not `YYYY-MM-DD`
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Unknown lecture category
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// Unknown material type
    #[error("Invalid material type: {0}")]
    InvalidMaterialKind(String),

    /// Start time is not before end time
    #[error("Invalid schedule: start time {start} must be before end time {end}")]
    InvalidSchedule { start: String, end: String },
}
