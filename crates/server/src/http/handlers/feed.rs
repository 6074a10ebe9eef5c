use axum::{
    extract::{Path, Query, State},
    Json,
};
use engine::{FeedView, PageRequest};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FeedParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Scope override category id; 0 narrows to the viewed category.
    pub scope: Option<i64>,
}

pub async fn category_feed(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<FeedParams>,
) -> Result<Json<FeedView>, ApiError> {
    let page = PageRequest::new(params.page, params.per_page);
    let view = state.aggregator.aggregate(&slug, params.scope, page).await?;
    Ok(Json(view))
}
