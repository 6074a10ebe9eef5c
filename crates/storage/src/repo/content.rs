use async_trait::async_trait;
use domain::{ContentItem, CoreError, NewContentItem};
use engine::traits::ContentItemStore;
use std::collections::BTreeSet;

use crate::{models::SqlContentItem, store_err, Db};

const COLUMNS: &str = "id, category_id, author_id, title, body, created_at, views, \
     approvals, disapprovals, is_announcement, announcement_scope, must_read, \
     target_categories, is_hidden, is_deleted";

#[async_trait]
impl ContentItemStore for Db {
    async fn get_by_id(&self, id: i64) -> Result<Option<ContentItem>, CoreError> {
        let sql = format!("SELECT {COLUMNS} FROM content_items WHERE id = ?");
        let row = sqlx::query_as::<_, SqlContentItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, item: NewContentItem) -> Result<ContentItem, CoreError> {
        let created_at = chrono::Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO content_items (category_id, author_id, title, body, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.category_id)
        .bind(item.author_id)
        .bind(&item.title)
        .bind(&item.body)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or(CoreError::NotFound("content item"))
    }

    async fn update_body(&self, id: i64, body: &str) -> Result<(), CoreError> {
        let result =
            sqlx::query("UPDATE content_items SET body = ? WHERE id = ? AND is_deleted = FALSE")
                .bind(body)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("content item"));
        }
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("UPDATE content_items SET is_deleted = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("content item"));
        }
        Ok(())
    }

    async fn list_page(
        &self,
        scope: &BTreeSet<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ContentItem>, i64), CoreError> {
        if scope.is_empty() {
            return Ok((Vec::new(), 0));
        }

        let placeholders = vec!["?"; scope.len()].join(", ");
        let filter = format!(
            "category_id IN ({placeholders}) AND is_announcement = FALSE \
             AND is_hidden = FALSE AND is_deleted = FALSE"
        );

        let sql = format!(
            "SELECT {COLUMNS} FROM content_items WHERE {filter} \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );
        let mut query = sqlx::query_as::<_, SqlContentItem>(&sql);
        for id in scope {
            query = query.bind(id);
        }
        let rows = query
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        let count_sql = format!("SELECT COUNT(*) FROM content_items WHERE {filter}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for id in scope {
            count_query = count_query.bind(id);
        }
        let total = count_query.fetch_one(&self.pool).await.map_err(store_err)?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    async fn list_global_announcements(&self) -> Result<Vec<ContentItem>, CoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM content_items \
             WHERE is_announcement = TRUE AND announcement_scope = 'global' \
             AND is_hidden = FALSE AND is_deleted = FALSE \
             ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, SqlContentItem>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_scoped_announcements(
        &self,
        category_id: Option<i64>,
    ) -> Result<Vec<ContentItem>, CoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM content_items \
             WHERE is_announcement = TRUE AND announcement_scope = 'category' \
             AND is_hidden = FALSE AND is_deleted = FALSE \
             ORDER BY id ASC"
        );
        let rows = sqlx::query_as::<_, SqlContentItem>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        // Target lists are small JSON arrays; containment is checked
        // here rather than with a join table.
        let items = rows
            .into_iter()
            .map(ContentItem::from)
            .filter(|item| category_id.map_or(true, |c| item.targets_category(c)))
            .collect();
        Ok(items)
    }

    async fn increment_views(&self, id: i64) -> Result<(), CoreError> {
        sqlx::query("UPDATE content_items SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn adjust_reactions(
        &self,
        id: i64,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let result = sqlx::query(
            "UPDATE content_items SET approvals = approvals + ?, disapprovals = disapprovals + ? \
             WHERE id = ?",
        )
        .bind(approve_delta)
        .bind(disapprove_delta)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("content item"));
        }

        let counters = sqlx::query_as::<_, (i64, i64)>(
            "SELECT approvals, disapprovals FROM content_items WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;
        Ok(counters)
    }
}
