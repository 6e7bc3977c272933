use std::env;

use business::domain::product::upload::{DEFAULT_MAX_IMAGE_BYTES, UploadPolicy};

const DEFAULT_DESTINATION: &str = "./uploads/products/";
/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Where product images land and how large they may be.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub destination: String,
    pub max_bytes: usize,
}

impl UploadConfig {
    /// Load upload configuration from environment variables
    ///
    /// Environment variables:
    /// - PRODUCT_IMAGE_DEST: Directory for product images (default: "./uploads/products/")
    /// - PRODUCT_IMAGE_MAX_BYTES: Maximum image size in bytes (default: 1048576)
    pub fn from_env() -> Self {
        let destination =
            env::var("PRODUCT_IMAGE_DEST").unwrap_or_else(|_| DEFAULT_DESTINATION.to_string());
        let max_bytes = env::var("PRODUCT_IMAGE_MAX_BYTES")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_MAX_IMAGE_BYTES);

        Self {
            destination,
            max_bytes,
        }
    }

    /// Largest request body accepted by the image upload route.
    pub fn body_limit(&self) -> usize {
        self.max_bytes.saturating_add(MULTIPART_OVERHEAD)
    }

    /// A fresh policy for one image upload.
    pub fn image_policy(&self) -> UploadPolicy {
        UploadPolicy::images(self.destination.clone(), self.max_bytes)
    }
}
