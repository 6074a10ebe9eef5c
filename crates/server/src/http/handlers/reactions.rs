use axum::{extract::State, http::HeaderMap, Json};
use domain::{ReactionKind, SubjectRef, SubjectType};
use engine::ReactionOutcome;
use serde::Deserialize;

use crate::http::{actor_id, error::ApiError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub subject_type: SubjectType,
    pub subject_id: i64,
    pub kind: String,
}

pub async fn toggle_reaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ReactionOutcome>, ApiError> {
    let kind: ReactionKind = payload.kind.parse()?;
    let subject = SubjectRef {
        subject_type: payload.subject_type,
        subject_id: payload.subject_id,
    };

    let outcome = state.toggle.apply(subject, actor_id(&headers), kind).await?;
    Ok(Json(outcome))
}
