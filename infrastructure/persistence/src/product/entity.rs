use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::Product;
use business::domain::shared::value_objects::UserRef;

/// A `products` row joined with its owner's display name.
#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub user_id: String,
    pub user_display_name: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            UserRef::new(self.user_id, self.user_display_name),
            self.title,
            self.content,
            self.image_url,
            self.created_at,
        )
    }
}
