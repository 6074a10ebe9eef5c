use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::{Comment, CoreError, NewComment};
use engine::traits::{CommentStore, ContentItemStore};
use serde::Deserialize;

use crate::http::{actor_id, error::ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
    pub parent_id: Option<i64>,
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let author_id = actor_id(&headers).ok_or(CoreError::AuthRequired)?;

    ContentItemStore::get_by_id(&state.db, post_id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(CoreError::NotFound("content item"))?;

    let comment = CommentStore::create(
        &state.db,
        NewComment {
            content_item_id: post_id,
            parent_id: payload.parent_id,
            author_id,
            body: payload.body,
        },
    )
    .await?;

    Ok(Json(comment))
}

/// Author-only removal; a non-author gets the same 401 as a missing
/// user since finer authorization is external to this core.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = actor_id(&headers).ok_or(CoreError::AuthRequired)?;
    let comment = CommentStore::get_by_id(&state.db, id)
        .await?
        .filter(|c| !c.is_deleted)
        .ok_or(CoreError::NotFound("comment"))?;

    if comment.author_id != actor {
        return Err(CoreError::AuthRequired.into());
    }

    CommentStore::soft_delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
