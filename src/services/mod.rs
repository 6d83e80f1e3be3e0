//! Business operations shared by the admin and API surfaces.
//!
//! Every function takes the request's [`crate::repository::UnitOfWork`] and
//! returns a [`ServiceResult`]; routes only translate the outcome into HTTP.

use crate::repository::{RepositoryError, RepositoryResult};

pub mod categories;
pub mod errors;
pub mod home;
pub mod posts;

pub use errors::{ServiceError, ServiceResult};

/// Decide what a write conflict means once the row has been looked up again.
fn resolve_conflict(entity: &str, still_exists: RepositoryResult<bool>) -> ServiceError {
    match still_exists {
        Ok(false) => {
            log::warn!("{entity} vanished before the write was committed");
            ServiceError::NotFound
        }
        Ok(true) => {
            log::warn!("{entity} was modified concurrently");
            ServiceError::Conflict
        }
        Err(e) => {
            log::error!("Failed to re-check {entity} after a conflict: {e}");
            e.into()
        }
    }
}

fn store_failure(action: &str, error: RepositoryError) -> ServiceError {
    log::error!("Failed to {action}: {error}");
    ServiceError::Store(error.to_string())
}
