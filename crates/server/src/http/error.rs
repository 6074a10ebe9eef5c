use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::CoreError;
use serde_json::json;

pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::AuthRequired => StatusCode::UNAUTHORIZED,
            CoreError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
            CoreError::Store(_) => StatusCode::BAD_GATEWAY,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
