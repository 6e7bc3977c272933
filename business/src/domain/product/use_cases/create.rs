use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::shared::value_objects::UserRef;

pub struct CreateProductParams {
    /// Acting user; becomes the product owner.
    pub owner: UserRef,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait CreateProductUseCase: Send + Sync {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError>;
}
