use async_trait::async_trait;
use domain::{Comment, CoreError, NewComment};
use engine::traits::CommentStore;

use crate::{models::SqlComment, store_err, Db};

const COLUMNS: &str = "id, content_item_id, parent_id, author_id, body, approvals, \
     disapprovals, created_at, is_hidden, is_deleted";

#[async_trait]
impl CommentStore for Db {
    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>, CoreError> {
        let sql = format!("SELECT {COLUMNS} FROM comments WHERE id = ?");
        let row = sqlx::query_as::<_, SqlComment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, comment: NewComment) -> Result<Comment, CoreError> {
        let created_at = chrono::Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO comments (content_item_id, parent_id, author_id, body, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(comment.content_item_id)
        .bind(comment.parent_id)
        .bind(comment.author_id)
        .bind(&comment.body)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or(CoreError::NotFound("comment"))
    }

    async fn soft_delete(&self, id: i64) -> Result<(), CoreError> {
        // Soft delete keeps the row so reply grouping stays intact.
        let result = sqlx::query("UPDATE comments SET is_deleted = TRUE, body = '' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("comment"));
        }
        Ok(())
    }

    async fn list_for_item(&self, content_item_id: i64) -> Result<Vec<Comment>, CoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM comments WHERE content_item_id = ? \
             ORDER BY created_at ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, SqlComment>(&sql)
            .bind(content_item_id)
            .fetch_all(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn adjust_reactions(
        &self,
        id: i64,
        approve_delta: i64,
        disapprove_delta: i64,
    ) -> Result<(i64, i64), CoreError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let result = sqlx::query(
            "UPDATE comments SET approvals = approvals + ?, disapprovals = disapprovals + ? \
             WHERE id = ?",
        )
        .bind(approve_delta)
        .bind(disapprove_delta)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound("comment"));
        }

        let counters = sqlx::query_as::<_, (i64, i64)>(
            "SELECT approvals, disapprovals FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;
        Ok(counters)
    }
}
