use chrono::{DateTime, Utc};
use poem_openapi::{Multipart, Object, types::multipart::Upload};

use business::domain::product::model::Product;
use business::domain::product::use_cases::read::ProductView;
use business::domain::shared::value_objects::UserRef;

#[derive(Debug, Clone, Object)]
pub struct CreateProductRequest {
    /// Product title (cannot be blank)
    pub title: String,
    /// Free-form description
    #[oai(default)]
    pub content: String,
    /// Image path; the default placeholder is used when omitted
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Object)]
pub struct UpdateProductRequest {
    /// Product title (cannot be blank)
    pub title: String,
    /// Free-form description
    #[oai(default)]
    pub content: String,
    /// Image path; the current image is kept when omitted
    #[oai(skip_serializing_if_is_none)]
    pub image_url: Option<String>,
}

/// Owner as shown next to a product.
#[derive(Debug, Clone, Object)]
pub struct ProductUserResponse {
    #[oai(rename = "displayName")]
    pub display_name: String,
}

impl From<UserRef> for ProductUserResponse {
    fn from(user: UserRef) -> Self {
        Self {
            display_name: user.display_name,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct ProductResponse {
    /// Product unique identifier
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    /// Owner
    pub user: ProductUserResponse,
    /// Creation timestamp
    pub created: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title,
            content: product.content,
            image_url: product.image_url,
            user: product.user.into(),
            created: product.created,
        }
    }
}

/// A single product as seen by the caller.
#[derive(Debug, Clone, Object)]
pub struct ProductDetailResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub user: ProductUserResponse,
    pub created: DateTime<Utc>,
    /// Whether the authenticated caller owns the product. False for anonymous
    /// callers.
    #[oai(rename = "isCurrentUserOwner")]
    pub is_current_user_owner: bool,
}

impl From<ProductView> for ProductDetailResponse {
    fn from(view: ProductView) -> Self {
        let ProductResponse {
            id,
            title,
            content,
            image_url,
            user,
            created,
        } = view.product.into();

        Self {
            id,
            title,
            content,
            image_url,
            user,
            created,
            is_current_user_owner: view.is_current_user_owner,
        }
    }
}

/// Multipart body of the image change endpoint.
#[derive(Multipart)]
pub struct ChangeProductImageForm {
    /// New image file (png, jpg, jpeg or gif)
    #[oai(rename = "newProductImage")]
    pub new_product_image: Option<Upload>,
}
