use thiserror::Error;

use crate::forms::FieldErrors;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed validation; the messages are keyed by field.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The request contradicts itself, e.g. route and body ids differ.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The row changed under a concurrent writer and still exists.
    #[error("concurrency conflict")]
    Conflict,
    /// The store failed for a reason the caller cannot fix.
    #[error("store failure: {0}")]
    Store(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
