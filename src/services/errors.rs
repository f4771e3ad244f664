use thiserror::Error;

use crate::repository::RepositoryError;
use crate::storage::StorageError;

/// Generic error type used by service layer functions.
///
/// Store and storage failures are re-raised unchanged so the route layer can
/// surface the underlying message verbatim.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// The backing store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// The blob store failed during an upload.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
