//! Error conversion glue between the layers.
//!
//! Domain types know nothing about repositories or services, so the
//! conversions live here rather than next to either error type.

use crate::domain::types::TypeConstraintError;
use crate::forms::FieldErrors;
use crate::repository::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(val: FieldErrors) -> Self {
        ServiceError::Validation(val)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::Conflict => ServiceError::Conflict,
            other => ServiceError::Store(other.to_string()),
        }
    }
}
