use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Failures surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A staged update or delete matched no row: it changed or vanished since it was read.
    #[error("concurrency conflict: the row changed or vanished since it was read")]
    Conflict,
    /// The store rejected a reference to a missing row.
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    /// A stored value does not satisfy the domain constraints.
    #[error("stored value is invalid: {0}")]
    ValidationError(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Database(DieselError),
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
