use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::get_by_id::{GetProductByIdParams, GetProductByIdUseCase};

pub struct GetProductByIdUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductByIdUseCase for GetProductByIdUseCaseImpl {
    async fn execute(&self, params: GetProductByIdParams) -> Result<Product, ProductError> {
        let id = Uuid::parse_str(params.id.trim()).map_err(|_| {
            self.logger
                .debug(&format!("Rejected malformed product id: {}", params.id));
            ProductError::InvalidIdentifier
        })?;

        self.logger.info(&format!("Fetching product by id: {}", id));

        self.repository
            .get_by_id(id)
            .await
            .map_err(ProductError::failed_lookup)
    }
}
