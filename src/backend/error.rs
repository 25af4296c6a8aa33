use thiserror::Error;

/// The only two ways a backend call fails. Neither is fatal or retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Well-formed reply with `success: false` (or a non-2xx status).
    #[error("{0}")]
    Logical(String),
    /// The request never produced a usable reply.
    #[error("network error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}
