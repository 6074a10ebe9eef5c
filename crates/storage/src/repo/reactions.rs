use async_trait::async_trait;
use domain::{CoreError, ReactionKind, SubjectRef};
use engine::traits::ReactionStore;

use crate::{models::SqlReaction, store_err, Db};

#[async_trait]
impl ReactionStore for Db {
    async fn get(
        &self,
        subject: SubjectRef,
        user_id: i64,
    ) -> Result<Option<ReactionKind>, CoreError> {
        let row = sqlx::query_as::<_, SqlReaction>(
            "SELECT kind FROM reactions WHERE subject_type = ? AND subject_id = ? AND user_id = ?",
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.subject_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.and_then(|r| r.kind()))
    }

    async fn upsert(
        &self,
        subject: SubjectRef,
        user_id: i64,
        kind: ReactionKind,
    ) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO reactions (subject_type, subject_id, user_id, kind)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(subject_type, subject_id, user_id) DO UPDATE SET kind = excluded.kind
            "#,
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.subject_id)
        .bind(user_id)
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn delete(&self, subject: SubjectRef, user_id: i64) -> Result<(), CoreError> {
        sqlx::query(
            "DELETE FROM reactions WHERE subject_type = ? AND subject_id = ? AND user_id = ?",
        )
        .bind(subject.subject_type.as_str())
        .bind(subject.subject_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }
}
