#[macro_use]
mod macros;

mod backend_client;
mod rental_client;
mod store_client;

pub use backend_client::BackendClient;
pub use rental_client::RentalClient;
pub use store_client::StoreClient;
