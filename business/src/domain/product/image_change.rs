use crate::domain::errors::RepositoryError;

use super::errors::ProductError;
use super::model::Product;
use super::storage::{StorageError, StoredImage};
use super::upload::UploadError;

/// Where the image-change workflow currently is.
///
/// `Idle -> Uploading -> Persisting -> CleaningUp -> Done`; any step may end
/// in `Failed`. A failure while cleaning up does not undo the persisted
/// product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageChangeState {
    Idle,
    Uploading,
    Persisting,
    CleaningUp,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageChangeFailure {
    #[error("auth.unauthenticated")]
    Unauthenticated,
    #[error("{0}")]
    Upload(UploadError),
    #[error("{0}")]
    Persist(RepositoryError),
    #[error("product.image_cleanup_failed")]
    Cleanup(StorageError),
}

impl From<ImageChangeFailure> for ProductError {
    fn from(failure: ImageChangeFailure) -> Self {
        match failure {
            ImageChangeFailure::Unauthenticated => ProductError::Unauthenticated,
            ImageChangeFailure::Upload(err) => ProductError::Upload(err),
            ImageChangeFailure::Persist(err) => ProductError::rejected_write(err),
            ImageChangeFailure::Cleanup(err) => ProductError::Cleanup(err),
        }
    }
}

/// Outcome of one step of the image-change workflow. Each step consumes the
/// previous outcome; a `Failed` outcome passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageChangeStep {
    Uploaded {
        product: Product,
        stored: StoredImage,
    },
    Persisted {
        product: Product,
        previous_image_url: String,
    },
    CleanedUp {
        product: Product,
        /// Path of the replaced image, `None` when it was the placeholder.
        removed: Option<String>,
    },
    Failed {
        kind: ImageChangeFailure,
        detail: String,
        /// The product as saved, when the failure happened after persisting.
        persisted: Option<Product>,
    },
}

impl ImageChangeStep {
    pub fn failed(kind: ImageChangeFailure, detail: impl Into<String>) -> Self {
        ImageChangeStep::Failed {
            kind,
            detail: detail.into(),
            persisted: None,
        }
    }

    /// State the workflow is in once this step has been produced.
    pub fn state(&self) -> ImageChangeState {
        match self {
            ImageChangeStep::Uploaded { .. } => ImageChangeState::Persisting,
            ImageChangeStep::Persisted { .. } => ImageChangeState::CleaningUp,
            ImageChangeStep::CleanedUp { .. } => ImageChangeState::Done,
            ImageChangeStep::Failed { .. } => ImageChangeState::Failed,
        }
    }

    pub fn into_result(self) -> Result<Product, ProductError> {
        match self {
            ImageChangeStep::CleanedUp { product, .. } => Ok(product),
            ImageChangeStep::Failed { kind, .. } => Err(kind.into()),
            // Workflow was stopped before cleaning up; the product in hand
            // is the latest known state.
            ImageChangeStep::Uploaded { product, .. }
            | ImageChangeStep::Persisted { product, .. } => Ok(product),
        }
    }
}
