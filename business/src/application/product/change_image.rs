use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::image_change::{ImageChangeFailure, ImageChangeStep};
use crate::domain::product::model::{DEFAULT_IMAGE_URL, Product};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::storage::ImageStorage;
use crate::domain::product::upload::{ImageFile, UploadError, UploadPolicy};
use crate::domain::product::use_cases::change_image::{
    ChangeProductImageParams, ChangeProductImageUseCase,
};

/// Replaces a product image in three steps: upload the new file, persist the
/// new `image_url`, remove the replaced file. Each step is a separate method
/// taking the previous [`ImageChangeStep`].
pub struct ChangeProductImageUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub storage: Arc<dyn ImageStorage>,
    pub logger: Arc<dyn Logger>,
}

impl ChangeProductImageUseCaseImpl {
    /// Runs the whole workflow and returns the last step reached.
    pub async fn run(&self, params: ChangeProductImageParams) -> ImageChangeStep {
        let (Some(user), Some(product)) = (params.acting_user.as_ref(), params.product) else {
            return ImageChangeStep::failed(
                ImageChangeFailure::Unauthenticated,
                "no signed-in user or no product to change",
            );
        };

        self.logger.info(&format!(
            "User {} is changing the image of product {}",
            user, product.id
        ));

        let step = self.upload(product, &params.file, &params.policy).await;
        let step = self.persist(step).await;
        self.clean_up(step).await
    }

    pub async fn upload(
        &self,
        product: Product,
        file: &ImageFile,
        policy: &UploadPolicy,
    ) -> ImageChangeStep {
        if let Err(err) = policy.check(file) {
            let detail = format!(
                "rejected upload {:?} ({:?}, {} bytes)",
                file.original_name,
                file.content_type,
                file.bytes.len()
            );
            self.logger.warn(&format!("{detail}: {err}"));
            return ImageChangeStep::failed(ImageChangeFailure::Upload(err), detail);
        }

        let file_name = policy.file_name_for(file);
        match self
            .storage
            .store(policy.destination(), &file_name, file)
            .await
        {
            Ok(stored) => {
                self.logger
                    .debug(&format!("Stored new product image at {}", stored.path));
                ImageChangeStep::Uploaded { product, stored }
            }
            Err(err) => {
                let detail = format!("could not write {file_name}: {err:?}");
                self.logger.error(&detail);
                ImageChangeStep::failed(
                    ImageChangeFailure::Upload(UploadError::Storage(err)),
                    detail,
                )
            }
        }
    }

    pub async fn persist(&self, step: ImageChangeStep) -> ImageChangeStep {
        let (mut product, stored) = match step {
            ImageChangeStep::Uploaded { product, stored } => (product, stored),
            other => return other,
        };

        let previous_image_url = std::mem::replace(&mut product.image_url, stored.path.clone());

        match self.repository.save(&product).await {
            Ok(()) => ImageChangeStep::Persisted {
                product,
                previous_image_url,
            },
            Err(err) => {
                // The new file is not referenced by anything.
                if let Err(remove_err) = self.storage.remove(&stored.path).await {
                    self.logger.warn(&format!(
                        "Orphaned product image {} after failed save: {:?}",
                        stored.path, remove_err
                    ));
                }
                ImageChangeStep::failed(
                    ImageChangeFailure::Persist(err.clone()),
                    format!("could not save product {}: {err}", product.id),
                )
            }
        }
    }

    pub async fn clean_up(&self, step: ImageChangeStep) -> ImageChangeStep {
        let (product, previous_image_url) = match step {
            ImageChangeStep::Persisted {
                product,
                previous_image_url,
            } => (product, previous_image_url),
            other => return other,
        };

        if previous_image_url == DEFAULT_IMAGE_URL || previous_image_url == product.image_url {
            return ImageChangeStep::CleanedUp {
                product,
                removed: None,
            };
        }

        match self.storage.remove(&previous_image_url).await {
            Ok(()) => ImageChangeStep::CleanedUp {
                product,
                removed: Some(previous_image_url),
            },
            Err(err) => {
                let detail = format!(
                    "could not delete old image {} of product {}: {:?}",
                    previous_image_url, product.id, err
                );
                self.logger.error(&detail);
                ImageChangeStep::Failed {
                    kind: ImageChangeFailure::Cleanup(err),
                    detail,
                    persisted: Some(product),
                }
            }
        }
    }
}

#[async_trait]
impl ChangeProductImageUseCase for ChangeProductImageUseCaseImpl {
    async fn execute(&self, params: ChangeProductImageParams) -> Result<Product, ProductError> {
        let step = self.run(params).await;
        if let ImageChangeStep::CleanedUp { product, .. } = &step {
            self.logger
                .info(&format!("Product image changed: {}", product.id));
        }
        step.into_result()
    }
}
