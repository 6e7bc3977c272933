use crate::domain::errors::RepositoryError;

use super::storage::StorageError;
use super::upload::UploadError;

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("product.invalid_id")]
    InvalidIdentifier,
    #[error("product.not_found")]
    NotFound,
    #[error("product.title_empty")]
    TitleEmpty,
    /// The store refused to create, save or remove the product.
    #[error("{0}")]
    Validation(RepositoryError),
    #[error("{0}")]
    Upload(#[from] UploadError),
    /// Removing the replaced image failed after the new one was persisted.
    #[error("product.image_cleanup_failed")]
    Cleanup(StorageError),
    #[error("auth.unauthenticated")]
    Unauthenticated,
    #[error("repository.persistence")]
    Repository(#[from] RepositoryError),
}

impl ProductError {
    /// Error for a failed write: a missing row stays a 404, anything else
    /// is reported as a rejected write.
    pub fn rejected_write(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ProductError::NotFound,
            other => ProductError::Validation(other),
        }
    }

    /// Error for a failed lookup: only a missing row has its own meaning.
    pub fn failed_lookup(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ProductError::NotFound,
            other => ProductError::Repository(other),
        }
    }
}
