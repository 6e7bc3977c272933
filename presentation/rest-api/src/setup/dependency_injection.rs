use std::sync::Arc;

use logger::TracingLogger;
use persistence::product::repository::ProductRepositoryPostgres;
use storage::local::LocalImageStorage;

use business::application::product::change_image::ChangeProductImageUseCaseImpl;
use business::application::product::create::CreateProductUseCaseImpl;
use business::application::product::delete::DeleteProductUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::read::ReadProductUseCaseImpl;
use business::application::product::update::UpdateProductUseCaseImpl;

use crate::api::security::FirebaseSessions;
use crate::config::upload_config::UploadConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub product_api: crate::api::product::routes::ProductApi,
}

impl DependencyContainer {
    pub async fn new(pool: sqlx::PgPool, upload_config: UploadConfig) -> anyhow::Result<Self> {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryPostgres::new(pool));
        let image_storage = Arc::new(LocalImageStorage::new(&upload_config.destination));

        // Product use cases
        let create_use_case = Arc::new(CreateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let read_use_case = Arc::new(ReadProductUseCaseImpl);
        let update_use_case = Arc::new(UpdateProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let delete_use_case = Arc::new(DeleteProductUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let change_image_use_case = Arc::new(ChangeProductImageUseCaseImpl {
            repository: product_repository,
            storage: image_storage,
            logger,
        });

        let product_api = crate::api::product::routes::ProductApi::new(
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            read_use_case,
            update_use_case,
            delete_use_case,
            change_image_use_case,
            Arc::new(FirebaseSessions),
            upload_config,
        );

        Ok(Self {
            health_api,
            product_api,
        })
    }
}
