use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::ProductError;
use crate::domain::shared::value_objects::{UserId, UserRef};

/// Placeholder `image_url` of a product that never had an image uploaded.
/// Files at this path are never removed by the image-change workflow.
pub const DEFAULT_IMAGE_URL: &str = "static/img/products/default.png";

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub user: UserRef,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created: DateTime<Utc>,
}

pub struct NewProductProps {
    pub user: UserRef,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl Product {
    pub fn new(props: NewProductProps) -> Result<Self, ProductError> {
        if props.title.trim().is_empty() {
            return Err(ProductError::TitleEmpty);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user: props.user,
            title: props.title,
            content: props.content,
            image_url: props
                .image_url
                .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()),
            created: Utc::now(),
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        user: UserRef,
        title: String,
        content: String,
        image_url: String,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            title,
            content,
            image_url,
            created,
        }
    }

    /// True iff a user is acting and is the one who created the product.
    pub fn is_owned_by(&self, acting_user: Option<&UserId>) -> bool {
        acting_user.is_some_and(|id| *id == self.user.id)
    }

    pub fn has_default_image(&self) -> bool {
        self.image_url == DEFAULT_IMAGE_URL
    }
}
