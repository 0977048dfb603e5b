//! Domain-level error type.
//!
//! Transport agnostic; the inbound HTTP adapter maps each variant to a
//! status code and response body. Nothing is retried at this layer: failures
//! are detected as close to their source as possible and propagate upward.

use thiserror::Error as ThisError;

use super::ports::PersistenceError;
use super::validation::ValidationErrors;

/// Failure categories surfaced by domain operations.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// The requested record does not exist. Distinct from validation
    /// failure: fetch-by-id runs before any mutation, so an update against a
    /// missing id never reaches validation.
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// One or more field constraints were violated on create or update.
    #[error("validation failed")]
    Validation(ValidationErrors),

    /// The datastore could not be reached (pool checkout, connectivity).
    #[error("datastore unavailable: {0}")]
    Unavailable(String),

    /// A datastore failure not caught by application-level validation, such
    /// as a uniqueness race or a foreign key violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Missing-record error for the given resource kind and id.
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    /// Connectivity-level failure.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Unexpected datastore or invariant failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<PersistenceError> for Error {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::Connection { message } => Self::Unavailable(message),
            PersistenceError::Query { message } => Self::Internal(message),
        }
    }
}
