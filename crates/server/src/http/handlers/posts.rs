use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use domain::{build_comment_tree, CommentThread, ContentItem, CoreError, NewContentItem};
use engine::traits::{CategoryStore, CommentStore, ContentItemStore};
use serde::{Deserialize, Serialize};

use crate::http::{actor_id, error::ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub body: String,
}

pub async fn create_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<ContentItem>, ApiError> {
    let author_id = actor_id(&headers).ok_or(CoreError::AuthRequired)?;
    let category = state
        .db
        .get_by_slug(&slug)
        .await?
        .ok_or(CoreError::NotFound("category"))?;

    let item = ContentItemStore::create(
        &state.db,
        NewContentItem {
            category_id: category.id,
            author_id,
            title: payload.title,
            body: payload.body,
        },
    )
    .await?;

    Ok(Json(item))
}

#[derive(Serialize)]
pub struct PostDetail {
    pub post: ContentItem,
    pub comments: Vec<CommentThread>,
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostDetail>, ApiError> {
    let mut post = ContentItemStore::get_by_id(&state.db, id)
        .await?
        .filter(|p| !p.is_deleted && !p.is_hidden)
        .ok_or(CoreError::NotFound("content item"))?;

    state.db.increment_views(id).await?;
    post.views += 1;

    let comments = state.db.list_for_item(id).await?;
    Ok(Json(PostDetail { post, comments: build_comment_tree(comments) }))
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub body: String,
}

/// Author-only edit. Authorization beyond "is the author" lives in the
/// external session layer, so a non-author deliberately gets the same
/// 401 as a missing user.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<ContentItem>, ApiError> {
    let actor = actor_id(&headers).ok_or(CoreError::AuthRequired)?;
    let post = ContentItemStore::get_by_id(&state.db, id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(CoreError::NotFound("content item"))?;

    if post.author_id != actor {
        return Err(CoreError::AuthRequired.into());
    }

    ContentItemStore::update_body(&state.db, id, &payload.body).await?;
    let updated = ContentItemStore::get_by_id(&state.db, id)
        .await?
        .ok_or(CoreError::NotFound("content item"))?;

    Ok(Json(updated))
}

/// Author-only removal; moderation tooling is external. As with
/// `update_post`, a non-author gets 401 on purpose.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let actor = actor_id(&headers).ok_or(CoreError::AuthRequired)?;
    let post = ContentItemStore::get_by_id(&state.db, id)
        .await?
        .filter(|p| !p.is_deleted)
        .ok_or(CoreError::NotFound("content item"))?;

    if post.author_id != actor {
        return Err(CoreError::AuthRequired.into());
    }

    ContentItemStore::soft_delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
