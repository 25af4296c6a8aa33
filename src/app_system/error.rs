use thiserror::Error;

use crate::backend::ApiError;
use crate::store::StoreError;

/// What a caller of `RentalClient` can get back. Failed user actions have
/// already been surfaced as a notification by the time this is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyncError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Unknown view: {0}")]
    UnknownView(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
