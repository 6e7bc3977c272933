use uuid::Uuid;

use super::storage::StorageError;

/// MIME types accepted for product images.
pub const IMAGE_MIME_TYPES: &[&str] = &["image/png", "image/jpg", "image/jpeg", "image/gif"];

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("upload.unsupported_media_type")]
    UnsupportedMediaType,
    #[error("upload.too_large")]
    TooLarge { limit: usize },
    #[error("upload.empty")]
    Empty,
    #[error("upload.storage_failed")]
    Storage(StorageError),
}

/// An uploaded file as received from the client, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub content_type: Option<String>,
    pub original_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Rules for a single upload. Built fresh for every request and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    destination: String,
    max_bytes: usize,
    allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    pub fn new(
        destination: impl Into<String>,
        max_bytes: usize,
        allowed_mime_types: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            destination: destination.into(),
            max_bytes,
            allowed_mime_types: allowed_mime_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Policy accepting only [`IMAGE_MIME_TYPES`].
    pub fn images(destination: impl Into<String>, max_bytes: usize) -> Self {
        Self::new(destination, max_bytes, IMAGE_MIME_TYPES.iter().copied())
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validates `file` against the policy. Type is checked before size.
    pub fn check(&self, file: &ImageFile) -> Result<(), UploadError> {
        self.check_declared(file.content_type.as_deref(), file.bytes.len())
    }

    /// Same rules as [`UploadPolicy::check`] applied to what a part declares,
    /// so an oversized upload can be refused before its bytes are read.
    pub fn check_declared(&self, content_type: Option<&str>, size: usize) -> Result<(), UploadError> {
        let mime = content_type
            .map(essence)
            .ok_or(UploadError::UnsupportedMediaType)?;

        if !self
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&mime))
        {
            return Err(UploadError::UnsupportedMediaType);
        }

        if size == 0 {
            return Err(UploadError::Empty);
        }

        if size > self.max_bytes {
            return Err(UploadError::TooLarge {
                limit: self.max_bytes,
            });
        }

        Ok(())
    }

    /// Random file name for `file`, with an extension taken from its MIME type.
    pub fn file_name_for(&self, file: &ImageFile) -> String {
        let stem = Uuid::new_v4().simple().to_string();
        match file.content_type.as_deref().map(essence).as_deref() {
            Some("image/png") => format!("{stem}.png"),
            Some("image/jpg") | Some("image/jpeg") => format!("{stem}.jpg"),
            Some("image/gif") => format!("{stem}.gif"),
            _ => stem,
        }
    }
}

/// `image/PNG; charset=binary` -> `image/png`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
