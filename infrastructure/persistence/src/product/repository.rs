use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::Product;
use business::domain::product::repository::ProductRepository;

use super::entity::ProductEntity;
use crate::error::map_sqlx_error;

const SELECT_PRODUCTS: &str = r#"SELECT p.id, p.user_id, u.display_name AS user_display_name,
        p.title, p.content, p.image_url, p.created_at
    FROM products p
    JOIN users u ON u.id = p.user_id"#;

/// Owner row backing the `user` expansion; the latest display name wins.
const UPSERT_OWNER: &str = r#"INSERT INTO users (id, display_name) VALUES ($1, $2)
    ON CONFLICT (id) DO UPDATE SET display_name = EXCLUDED.display_name"#;

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "{SELECT_PRODUCTS} ORDER BY p.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity =
            sqlx::query_as::<_, ProductEntity>(&format!("{SELECT_PRODUCTS} WHERE p.id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?
                .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn save(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        sqlx::query(UPSERT_OWNER)
        .bind(product.user.id.as_str())
        .bind(&product.user.display_name)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query(
            r#"INSERT INTO products (id, user_id, title, content, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                content = EXCLUDED.content,
                image_url = EXCLUDED.image_url"#,
        )
        .bind(product.id)
        .bind(product.user.id.as_str())
        .bind(&product.title)
        .bind(&product.content)
        .bind(&product.image_url)
        .bind(product.created)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_refresh_owner_display_name_on_save() {
        let normalized = UPSERT_OWNER.split_whitespace().collect::<Vec<_>>().join(" ");

        assert!(normalized.contains("ON CONFLICT (id) DO UPDATE SET display_name = EXCLUDED.display_name"));
        assert!(!normalized.contains("DO NOTHING"));
    }

    #[test]
    fn should_read_owner_name_from_users_table() {
        assert!(SELECT_PRODUCTS.contains("u.display_name AS user_display_name"));
        assert!(SELECT_PRODUCTS.contains("JOIN users u ON u.id = p.user_id"));
    }
}
