use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("an acting user is required")]
    AuthRequired,

    #[error("store error: {0}")]
    Store(String),

    #[error("invalid reaction kind: {0:?}")]
    InvalidTransition(String),
}

impl CoreError {
    /// `Store` is the only class callers may retry; the toggle is
    /// re-entrant after a failed partial attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Store(_))
    }
}
