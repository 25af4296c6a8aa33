//! Client-side state and the actor that owns it.

mod error;
mod sequence;
mod service;
mod state;

pub use error::*;
pub use sequence::{Collection, Ticket};
pub use service::StoreService;
pub use state::{AppState, Snapshot};
