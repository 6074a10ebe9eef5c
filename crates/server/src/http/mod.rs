pub mod error;
pub mod handlers;
pub mod router;

use axum::http::HeaderMap;

/// Acting user, if any. Authentication is external; the session layer
/// in front of this service injects the header.
pub(crate) fn actor_id(headers: &HeaderMap) -> Option<i64> {
    headers.get("x-user-id")?.to_str().ok()?.parse().ok()
}
