use async_trait::async_trait;
use domain::{Category, CoreError};
use engine::traits::CategoryStore;

use crate::{models::SqlCategory, store_err, Db};

#[async_trait]
impl CategoryStore for Db {
    async fn list_all(&self) -> Result<Vec<Category>, CoreError> {
        let rows = sqlx::query_as::<_, SqlCategory>(
            r#"
            SELECT id, name, slug, parent_id, display_order
            FROM categories
            ORDER BY display_order ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Category>, CoreError> {
        let row = sqlx::query_as::<_, SqlCategory>(
            "SELECT id, name, slug, parent_id, display_order FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(Into::into))
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, CoreError> {
        let row = sqlx::query_as::<_, SqlCategory>(
            "SELECT id, name, slug, parent_id, display_order FROM categories WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(Into::into))
    }
}
