use std::sync::Arc;

use poem::{Endpoint, EndpointExt, middleware::SizeLimit};
use poem_openapi::{
    OpenApi,
    param::{Header, Path},
    payload::Json,
    types::multipart::Upload,
};

use business::domain::product::errors::ProductError;
use business::domain::product::model::Product;
use business::domain::product::storage::StorageError;
use business::domain::product::upload::{ImageFile, UploadError, UploadPolicy};
use business::domain::product::use_cases::change_image::{
    ChangeProductImageParams, ChangeProductImageUseCase,
};
use business::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use business::domain::product::use_cases::delete::{DeleteProductParams, DeleteProductUseCase};
use business::domain::product::use_cases::get_all::GetAllProductsUseCase;
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::read::{ReadProductParams, ReadProductUseCase};
use business::domain::product::use_cases::update::{UpdateProductParams, UpdateProductUseCase};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    ChangeProductImageForm, CreateProductRequest, ProductDetailResponse, ProductResponse,
    UpdateProductRequest,
};
use crate::api::security::{SessionResolver, SessionUser};
use crate::api::tags::ApiTags;
use crate::config::upload_config::UploadConfig;

pub struct ProductApi {
    create_use_case: Arc<dyn CreateProductUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    read_use_case: Arc<dyn ReadProductUseCase>,
    update_use_case: Arc<dyn UpdateProductUseCase>,
    delete_use_case: Arc<dyn DeleteProductUseCase>,
    change_image_use_case: Arc<dyn ChangeProductImageUseCase>,
    sessions: Arc<dyn SessionResolver>,
    upload_config: UploadConfig,
}

impl ProductApi {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_use_case: Arc<dyn CreateProductUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        read_use_case: Arc<dyn ReadProductUseCase>,
        update_use_case: Arc<dyn UpdateProductUseCase>,
        delete_use_case: Arc<dyn DeleteProductUseCase>,
        change_image_use_case: Arc<dyn ChangeProductImageUseCase>,
        sessions: Arc<dyn SessionResolver>,
        upload_config: UploadConfig,
    ) -> Self {
        Self {
            create_use_case,
            get_all_use_case,
            get_by_id_use_case,
            read_use_case,
            update_use_case,
            delete_use_case,
            change_image_use_case,
            sessions,
            upload_config,
        }
    }

    /// Loads the product a route targets.
    async fn resolve(&self, id: String) -> Result<Product, ProductError> {
        self.get_by_id_use_case
            .execute(GetProductByIdParams { id })
            .await
    }

    async fn session(&self, authorization: &Header<Option<String>>) -> Option<SessionUser> {
        self.sessions.resolve(authorization.0.as_deref()).await
    }
}

/// Caps the image route body before multipart parsing spools it.
fn limit_image_body(ep: impl Endpoint) -> impl Endpoint {
    ep.with(SizeLimit::new(UploadConfig::from_env().body_limit()))
}

/// Reads an uploaded part once its declared type and size pass `policy`.
/// No part at all becomes an empty file without a content type.
async fn read_image(
    upload: Option<Upload>,
    policy: &UploadPolicy,
) -> Result<ImageFile, ProductError> {
    let Some(upload) = upload else {
        return Ok(ImageFile {
            content_type: None,
            original_name: None,
            bytes: Vec::new(),
        });
    };

    let content_type = upload.content_type().map(str::to_string);
    let original_name = upload.file_name().map(str::to_string);
    policy.check_declared(content_type.as_deref(), upload.size())?;

    let bytes = upload.into_vec().await.map_err(|e| {
        tracing::warn!("Could not read uploaded image: {e}");
        UploadError::Storage(StorageError::Io(e.to_string()))
    })?;

    Ok(ImageFile {
        content_type,
        original_name,
        bytes,
    })
}

/// Product catalogue API
///
/// Endpoints for creating, reading, updating and deleting products, and for
/// replacing a product image.
#[OpenApi]
impl ProductApi {
    /// Create a new product
    ///
    /// The signed-in user becomes the owner.
    #[oai(path = "/products", method = "post", tag = "ApiTags::Products")]
    async fn create_product(
        &self,
        /// `Bearer <Firebase ID token>`
        #[oai(name = "Authorization")]
        authorization: Header<Option<String>>,
        body: Json<CreateProductRequest>,
    ) -> CreateProductResponse {
        let Some(session) = self.session(&authorization).await else {
            return ProductError::Unauthenticated.into();
        };

        let params = CreateProductParams {
            owner: session.as_owner(),
            title: body.0.title,
            content: body.0.content,
            image_url: body.0.image_url,
        };

        match self.create_use_case.execute(params).await {
            Ok(product) => CreateProductResponse::Created(Json(product.into())),
            Err(err) => err.into(),
        }
    }

    /// List all products
    ///
    /// Newest first, owner reduced to its display name.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Products")]
    async fn get_all_products(&self) -> GetAllProductsResponse {
        match self.get_all_use_case.execute().await {
            Ok(products) => {
                let responses: Vec<ProductResponse> =
                    products.into_iter().map(|p| p.into()).collect();
                GetAllProductsResponse::Ok(Json(responses))
            }
            Err(err) => err.into(),
        }
    }

    /// Get a product by ID
    ///
    /// Authentication is optional; it only decides `isCurrentUserOwner`.
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Products")]
    async fn get_product_by_id(
        &self,
        id: Path<String>,
        /// Optional `Bearer <Firebase ID token>`
        #[oai(name = "Authorization")]
        authorization: Header<Option<String>>,
    ) -> GetProductByIdResponse {
        let product = match self.resolve(id.0).await {
            Ok(product) => product,
            Err(err) => return err.into(),
        };

        let acting_user = self.session(&authorization).await.map(|session| session.id);

        let view = self.read_use_case.execute(ReadProductParams {
            product,
            acting_user,
        });
        GetProductByIdResponse::Ok(Json(view.into()))
    }

    /// Update a product
    ///
    /// Overwrites title, content and, when given, the image path.
    #[oai(path = "/products/:id", method = "put", tag = "ApiTags::Products")]
    async fn update_product(
        &self,
        /// `Bearer <Firebase ID token>`
        #[oai(name = "Authorization")]
        authorization: Header<Option<String>>,
        id: Path<String>,
        body: Json<UpdateProductRequest>,
    ) -> UpdateProductResponse {
        if self.session(&authorization).await.is_none() {
            return ProductError::Unauthenticated.into();
        }

        let product = match self.resolve(id.0).await {
            Ok(product) => product,
            Err(err) => return err.into(),
        };

        let params = UpdateProductParams {
            product,
            title: body.0.title,
            content: body.0.content,
            image_url: body.0.image_url,
        };

        match self.update_use_case.execute(params).await {
            Ok(product) => UpdateProductResponse::Ok(Json(product.into())),
            Err(err) => err.into(),
        }
    }

    /// Delete a product
    ///
    /// Returns the removed product.
    #[oai(path = "/products/:id", method = "delete", tag = "ApiTags::Products")]
    async fn delete_product(
        &self,
        /// `Bearer <Firebase ID token>`
        #[oai(name = "Authorization")]
        authorization: Header<Option<String>>,
        id: Path<String>,
    ) -> DeleteProductResponse {
        if self.session(&authorization).await.is_none() {
            return ProductError::Unauthenticated.into();
        }

        let product = match self.resolve(id.0).await {
            Ok(product) => product,
            Err(err) => return err.into(),
        };

        match self
            .delete_use_case
            .execute(DeleteProductParams { product })
            .await
        {
            Ok(product) => DeleteProductResponse::Ok(Json(product.into())),
            Err(err) => err.into(),
        }
    }

    /// Replace a product image
    ///
    /// Multipart upload with a single `newProductImage` file (png, jpg, jpeg
    /// or gif). The previous image file is removed unless it was the default
    /// placeholder. Requests must carry `Content-Length`.
    #[oai(
        path = "/products/:id/image",
        method = "post",
        tag = "ApiTags::Products",
        transform = "limit_image_body"
    )]
    async fn change_product_image(
        &self,
        /// `Bearer <Firebase ID token>`
        #[oai(name = "Authorization")]
        authorization: Header<Option<String>>,
        id: Path<String>,
        form: ChangeProductImageForm,
    ) -> ChangeProductImageResponse {
        let acting_user = self.session(&authorization).await.map(|session| session.id);

        // No lookup and no upload read without a session.
        let product = match acting_user {
            Some(_) => match self.resolve(id.0).await {
                Ok(product) => Some(product),
                Err(err) => return err.into(),
            },
            None => None,
        };

        let policy = self.upload_config.image_policy();
        let upload = acting_user.as_ref().and(form.new_product_image);
        let file = match read_image(upload, &policy).await {
            Ok(file) => file,
            Err(err) => return err.into(),
        };

        let params = ChangeProductImageParams {
            acting_user,
            product,
            file,
            policy,
        };

        match self.change_image_use_case.execute(params).await {
            Ok(product) => ChangeProductImageResponse::Ok(Json(product.into())),
            Err(err) => err.into(),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CreateProductResponse {
    #[oai(status = 201)]
    Created(Json<ProductResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl From<ProductError> for CreateProductResponse {
    fn from(err: ProductError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            401 => CreateProductResponse::Unauthorized(json),
            422 => CreateProductResponse::UnprocessableEntity(json),
            _ => CreateProductResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllProductsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl From<ProductError> for GetAllProductsResponse {
    fn from(err: ProductError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            422 => GetAllProductsResponse::UnprocessableEntity(json),
            _ => GetAllProductsResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductDetailResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl From<ProductError> for GetProductByIdResponse {
    fn from(err: ProductError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => GetProductByIdResponse::BadRequest(json),
            404 => GetProductByIdResponse::NotFound(json),
            _ => GetProductByIdResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum UpdateProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl From<ProductError> for UpdateProductResponse {
    fn from(err: ProductError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => UpdateProductResponse::BadRequest(json),
            401 => UpdateProductResponse::Unauthorized(json),
            404 => UpdateProductResponse::NotFound(json),
            422 => UpdateProductResponse::UnprocessableEntity(json),
            _ => UpdateProductResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum DeleteProductResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl From<ProductError> for DeleteProductResponse {
    fn from(err: ProductError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => DeleteProductResponse::BadRequest(json),
            401 => DeleteProductResponse::Unauthorized(json),
            404 => DeleteProductResponse::NotFound(json),
            422 => DeleteProductResponse::UnprocessableEntity(json),
            _ => DeleteProductResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ChangeProductImageResponse {
    #[oai(status = 200)]
    Ok(Json<ProductResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl From<ProductError> for ChangeProductImageResponse {
    fn from(err: ProductError) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => ChangeProductImageResponse::BadRequest(json),
            401 => ChangeProductImageResponse::Unauthorized(json),
            404 => ChangeProductImageResponse::NotFound(json),
            422 => ChangeProductImageResponse::UnprocessableEntity(json),
            _ => ChangeProductImageResponse::InternalError(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::application::product::change_image::ChangeProductImageUseCaseImpl;
    use business::domain::errors::RepositoryError;
    use business::domain::product::model::DEFAULT_IMAGE_URL;
    use business::domain::product::repository::ProductRepository;
    use business::domain::product::storage::{ImageStorage, StoredImage};
    use business::domain::product::use_cases::read::ProductView;
    use business::domain::shared::value_objects::{UserId, UserRef};
    use chrono::Utc;
    use logger::TracingLogger;
    use mockall::mock;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn should_route_lookup_errors_to_matching_read_responses() {
        assert!(matches!(
            GetProductByIdResponse::from(ProductError::InvalidIdentifier),
            GetProductByIdResponse::BadRequest(_)
        ));
        assert!(matches!(
            GetProductByIdResponse::from(ProductError::NotFound),
            GetProductByIdResponse::NotFound(_)
        ));
        assert!(matches!(
            GetProductByIdResponse::from(ProductError::Repository(RepositoryError::DatabaseError)),
            GetProductByIdResponse::InternalError(_)
        ));
    }

    #[test]
    fn should_report_list_store_failure_as_unprocessable() {
        assert!(matches!(
            GetAllProductsResponse::from(ProductError::Validation(RepositoryError::DatabaseError)),
            GetAllProductsResponse::UnprocessableEntity(_)
        ));
    }

    #[test]
    fn should_route_image_change_failures() {
        assert!(matches!(
            ChangeProductImageResponse::from(ProductError::Unauthenticated),
            ChangeProductImageResponse::Unauthorized(_)
        ));
        assert!(matches!(
            ChangeProductImageResponse::from(ProductError::Cleanup(StorageError::OutsideRoot)),
            ChangeProductImageResponse::UnprocessableEntity(_)
        ));
        assert!(matches!(
            ChangeProductImageResponse::from(ProductError::Upload(UploadError::Empty)),
            ChangeProductImageResponse::UnprocessableEntity(_)
        ));
    }

    mock! {
        pub GetById {}

        #[async_trait]
        impl GetProductByIdUseCase for GetById {
            async fn execute(&self, params: GetProductByIdParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub ChangeImage {}

        #[async_trait]
        impl ChangeProductImageUseCase for ChangeImage {
            async fn execute(&self, params: ChangeProductImageParams) -> Result<Product, ProductError>;
        }
    }

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
        pub Storage {}

        #[async_trait]
        impl ImageStorage for Storage {
            async fn store(
                &self,
                destination: &str,
                file_name: &str,
                file: &ImageFile,
            ) -> Result<StoredImage, StorageError>;
            async fn remove(&self, path: &str) -> Result<(), StorageError>;
        }
    }

    /// Use cases the routes under test never reach.
    struct Unused;

    #[async_trait]
    impl CreateProductUseCase for Unused {
        async fn execute(&self, _: CreateProductParams) -> Result<Product, ProductError> {
            unreachable!("create is not exercised here")
        }
    }

    #[async_trait]
    impl GetAllProductsUseCase for Unused {
        async fn execute(&self) -> Result<Vec<Product>, ProductError> {
            unreachable!("list is not exercised here")
        }
    }

    impl ReadProductUseCase for Unused {
        fn execute(&self, _: ReadProductParams) -> ProductView {
            unreachable!("read is not exercised here")
        }
    }

    #[async_trait]
    impl UpdateProductUseCase for Unused {
        async fn execute(&self, _: UpdateProductParams) -> Result<Product, ProductError> {
            unreachable!("update is not exercised here")
        }
    }

    #[async_trait]
    impl DeleteProductUseCase for Unused {
        async fn execute(&self, _: DeleteProductParams) -> Result<Product, ProductError> {
            unreachable!("delete is not exercised here")
        }
    }

    const VALID_BEARER: &str = "Bearer valid-token";

    /// Accepts exactly [`VALID_BEARER`].
    struct FixedSessions;

    #[async_trait]
    impl SessionResolver for FixedSessions {
        async fn resolve(&self, authorization: Option<&str>) -> Option<SessionUser> {
            (authorization == Some(VALID_BEARER)).then(|| SessionUser {
                id: UserId::new("owner-uid"),
                display_name: "Grace".to_string(),
            })
        }
    }

    fn stored_product() -> Product {
        Product::from_repository(
            Uuid::new_v4(),
            UserRef::new("owner-uid", "Grace"),
            "Vase".to_string(),
            "Blue glass".to_string(),
            DEFAULT_IMAGE_URL.to_string(),
            Utc::now(),
        )
    }

    fn resolving(product: Product) -> MockGetById {
        let mut get_by_id = MockGetById::new();
        get_by_id
            .expect_execute()
            .returning(move |_| Ok(product.clone()));
        get_by_id
    }

    fn client(
        get_by_id: MockGetById,
        change_image: Arc<dyn ChangeProductImageUseCase>,
        max_bytes: usize,
    ) -> TestClient<poem::endpoint::BoxEndpoint<'static>> {
        let api = ProductApi::new(
            Arc::new(Unused),
            Arc::new(Unused),
            Arc::new(get_by_id),
            Arc::new(Unused),
            Arc::new(Unused),
            Arc::new(Unused),
            change_image,
            Arc::new(FixedSessions),
            UploadConfig {
                destination: "uploads/products/".to_string(),
                max_bytes,
            },
        );
        TestClient::new(OpenApiService::new(api, "test", "1.0"))
    }

    const BOUNDARY: &str = "X-BOUNDARY";

    fn image_form(content_type: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"newProductImage\"; filename=\"vase.png\"\r\n",
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn never_changing() -> Arc<dyn ChangeProductImageUseCase> {
        let mut change_image = MockChangeImage::new();
        change_image.expect_execute().never();
        Arc::new(change_image)
    }

    #[tokio::test]
    async fn should_answer_json_unauthorized_for_image_change_without_session() {
        let mut get_by_id = MockGetById::new();
        get_by_id.expect_execute().never();
        let workflow = ChangeProductImageUseCaseImpl {
            repository: Arc::new(MockProductRepo::new()),
            storage: Arc::new(MockStorage::new()),
            logger: Arc::new(TracingLogger),
        };
        let cli = client(get_by_id, Arc::new(workflow), 1024);
        let body = image_form("image/png", &[137, 80, 78, 71]);

        let resp = cli
            .post(format!("/products/{}/image", Uuid::new_v4()))
            .content_type(format!("multipart/form-data; boundary={BOUNDARY}"))
            .header("content-length", body.len())
            .body(body)
            .send()
            .await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
        resp.assert_content_type("application/json; charset=utf-8");
        resp.assert_json(json!({
            "name": "Unauthenticated",
            "message": "auth.unauthenticated"
        }))
        .await;
    }

    #[tokio::test]
    async fn should_answer_json_unauthorized_for_create_with_rejected_token() {
        let cli = client(MockGetById::new(), never_changing(), 1024);

        let resp = cli
            .post("/products")
            .header("authorization", "Bearer forged")
            .body_json(&json!({ "title": "Vase" }))
            .send()
            .await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
        resp.assert_json(json!({
            "name": "Unauthenticated",
            "message": "auth.unauthenticated"
        }))
        .await;
    }

    #[tokio::test]
    async fn should_refuse_oversized_image_before_it_reaches_the_workflow() {
        let cli = client(resolving(stored_product()), never_changing(), 16);
        let body = image_form("image/png", &[0u8; 17]);

        let resp = cli
            .post(format!("/products/{}/image", Uuid::new_v4()))
            .header("authorization", VALID_BEARER)
            .content_type(format!("multipart/form-data; boundary={BOUNDARY}"))
            .header("content-length", body.len())
            .body(body)
            .send()
            .await;

        resp.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        resp.assert_json(json!({
            "name": "UploadError",
            "message": "upload.too_large"
        }))
        .await;
    }

    #[tokio::test]
    async fn should_refuse_declared_body_over_route_limit() {
        let cli = client(resolving(stored_product()), never_changing(), 16);

        let resp = cli
            .post(format!("/products/{}/image", Uuid::new_v4()))
            .header("authorization", VALID_BEARER)
            .content_type(format!("multipart/form-data; boundary={BOUNDARY}"))
            .header("content-length", 1024 * 1024 * 1024)
            .body(image_form("image/png", &[1, 2, 3]))
            .send()
            .await;

        resp.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn should_change_image_for_signed_in_user() {
        let mut repo = MockProductRepo::new();
        repo.expect_save()
            .withf(|p| p.image_url.starts_with("uploads/products/"))
            .times(1)
            .returning(|_| Ok(()));
        let mut storage = MockStorage::new();
        storage.expect_store().times(1).returning(|dest, name, _| {
            Ok(StoredImage {
                file_name: name.to_string(),
                path: format!("{dest}{name}"),
            })
        });
        storage.expect_remove().never();
        let workflow = ChangeProductImageUseCaseImpl {
            repository: Arc::new(repo),
            storage: Arc::new(storage),
            logger: Arc::new(TracingLogger),
        };
        let cli = client(resolving(stored_product()), Arc::new(workflow), 1024);
        let body = image_form("image/png", &[137, 80, 78, 71]);

        let resp = cli
            .post(format!("/products/{}/image", Uuid::new_v4()))
            .header("authorization", VALID_BEARER)
            .content_type(format!("multipart/form-data; boundary={BOUNDARY}"))
            .header("content-length", body.len())
            .body(body)
            .send()
            .await;

        resp.assert_status_is_ok();
        let json = resp.json().await;
        let image_url = json.value().object().get("image_url").string().to_string();
        assert!(image_url.starts_with("uploads/products/"));
        assert!(image_url.ends_with(".png"));
    }
}
