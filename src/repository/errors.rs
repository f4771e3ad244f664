use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failure raised by any operation against the backing store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not acquire a pooled connection.
    #[error("database pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The store rejected or failed the query.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored row violated a domain constraint.
    #[error("{0}")]
    Validation(String),
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(value: TypeConstraintError) -> Self {
        Self::Validation(value.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
