use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

pub struct UpdateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl UpdateProductUseCase for UpdateProductUseCaseImpl {
    async fn execute(&self, params: UpdateProductParams) -> Result<Product, ProductError> {
        let mut product = params.product;
        self.logger
            .info(&format!("Updating product: {}", product.id));

        if params.title.trim().is_empty() {
            return Err(ProductError::TitleEmpty);
        }

        product.title = params.title;
        product.content = params.content;
        if let Some(image_url) = params.image_url {
            product.image_url = image_url;
        }

        self.repository
            .save(&product)
            .await
            .map_err(ProductError::rejected_write)?;

        self.logger.info(&format!("Product updated: {}", product.id));
        Ok(product)
    }
}
