use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use business::domain::product::storage::{ImageStorage, StorageError, StoredImage};
use business::domain::product::upload::ImageFile;

/// Stores product images on the local filesystem.
///
/// Only paths under `root` are written or removed. Destinations and paths
/// handed in are interpreted as given (relative to the working directory,
/// like the `image_url` values persisted with products).
pub struct LocalImageStorage {
    root: PathBuf,
}

impl LocalImageStorage {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: without_cur_dir(root.as_ref()),
        }
    }

    fn guard(&self, path: &Path) -> Result<(), StorageError> {
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if escapes || !without_cur_dir(path).starts_with(&self.root) {
            tracing::warn!("Refusing to touch {} outside {}", path.display(), self.root.display());
            return Err(StorageError::OutsideRoot);
        }
        Ok(())
    }
}

/// `./uploads/x.png` and `uploads/x.png` name the same file.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    tracing::error!("Filesystem error on {}: {err}", path.display());
    StorageError::Io(format!("{}: {err}", path.display()))
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(
        &self,
        destination: &str,
        file_name: &str,
        file: &ImageFile,
    ) -> Result<StoredImage, StorageError> {
        let dir = Path::new(destination);
        let target = dir.join(file_name);
        self.guard(&target)?;

        fs::create_dir_all(dir)
            .await
            .map_err(|e| io_error(dir, e))?;
        fs::write(&target, &file.bytes)
            .await
            .map_err(|e| io_error(&target, e))?;

        Ok(StoredImage {
            file_name: file_name.to_string(),
            path: target.to_string_lossy().into_owned(),
        })
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        let path = Path::new(path);
        self.guard(path)?;

        fs::remove_file(path)
            .await
            .map_err(|e| io_error(path, e))
    }
}
