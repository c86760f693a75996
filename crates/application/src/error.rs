//! Application-level errors

use domain::DomainError;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Input failed field validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error (storage failures and the like)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for ApplicationError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
