use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct GetProductByIdParams {
    /// Raw identifier as received; its format is checked before any lookup.
    pub id: String,
}

/// Resolves the product a request targets. The result is handed explicitly
/// to the read, update, delete and image-change use cases.
#[async_trait]
pub trait GetProductByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetProductByIdParams) -> Result<Product, ProductError>;
}
