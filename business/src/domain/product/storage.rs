use async_trait::async_trait;

use super::upload::ImageFile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage.io_error")]
    Io(String),
    #[error("storage.outside_root")]
    OutsideRoot,
}

/// A file written by [`ImageStorage::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub file_name: String,
    /// Destination joined with `file_name`; becomes the product `image_url`.
    pub path: String,
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Writes `file` under `destination` using `file_name`.
    async fn store(
        &self,
        destination: &str,
        file_name: &str,
        file: &ImageFile,
    ) -> Result<StoredImage, StorageError>;

    async fn remove(&self, path: &str) -> Result<(), StorageError>;
}
