use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("No cart item at index {0}")]
    InvalidCartIndex(usize),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
