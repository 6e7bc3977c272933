use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct DeleteProductParams {
    pub product: Product,
}

#[async_trait]
pub trait DeleteProductUseCase: Send + Sync {
    /// Removes the product and hands it back.
    async fn execute(&self, params: DeleteProductParams) -> Result<Product, ProductError>;
}
