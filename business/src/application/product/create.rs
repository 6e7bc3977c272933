use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{NewProductProps, Product};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger.info(&format!(
            "Creating product '{}' for user {}",
            params.title, params.owner.id
        ));

        let product = Product::new(NewProductProps {
            user: params.owner,
            title: params.title,
            content: params.content,
            image_url: params.image_url,
        })?;

        self.repository
            .save(&product)
            .await
            .map_err(ProductError::rejected_write)?;

        self.logger
            .info(&format!("Product created with id: {}", product.id));
        Ok(product)
    }
}
