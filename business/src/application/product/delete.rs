use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};

pub struct DeleteProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl DeleteProductUseCase for DeleteProductUseCaseImpl {
    async fn execute(&self, params: DeleteProductParams) -> Result<Product, ProductError> {
        let product = params.product;
        self.logger
            .info(&format!("Deleting product: {}", product.id));

        self.repository
            .delete(product.id)
            .await
            .map_err(ProductError::rejected_write)?;

        self.logger.info(&format!("Product deleted: {}", product.id));
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::model::DEFAULT_IMAGE_URL;
    use crate::domain::shared::value_objects::UserRef;
    use chrono::Utc;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
            async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn stored_product() -> Product {
        Product::from_repository(
            Uuid::new_v4(),
            UserRef::new("owner-uid", "Grace"),
            "Chair".to_string(),
            "Oak".to_string(),
            DEFAULT_IMAGE_URL.to_string(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn should_delete_product_and_return_it() {
        let product = stored_product();
        let product_id = product.id;
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_delete()
            .withf(move |id| *id == product_id)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let deleted = use_case
            .execute(DeleteProductParams { product })
            .await
            .unwrap();

        assert_eq!(deleted.id, product_id);
        assert_eq!(deleted.title, "Chair");
    }

    #[tokio::test]
    async fn should_report_validation_error_when_removal_fails() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams {
                product: stored_product(),
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ProductError::Validation(RepositoryError::DatabaseError)
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_already_removed() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = DeleteProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(DeleteProductParams {
                product: stored_product(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), ProductError::NotFound));
    }
}
