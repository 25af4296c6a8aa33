//! REST consumer for the rental API.

mod envelope;
mod error;
mod http;
mod service;

pub use error::ApiError;
pub use http::HttpApi;
pub use service::BackendService;
