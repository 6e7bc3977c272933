use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::upload::{ImageFile, UploadPolicy};
use crate::domain::shared::value_objects::UserId;

pub struct ChangeProductImageParams {
    /// Verified session, checked independently of `product`.
    pub acting_user: Option<UserId>,
    pub product: Option<Product>,
    pub file: ImageFile,
    pub policy: UploadPolicy,
}

#[async_trait]
pub trait ChangeProductImageUseCase: Send + Sync {
    async fn execute(&self, params: ChangeProductImageParams) -> Result<Product, ProductError>;
}
