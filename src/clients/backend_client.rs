use tokio::sync::mpsc;

use crate::backend::ApiError;
use crate::domain::{Car, CarQuery, CartItem, CartItemRequest, CheckoutReceipt, NewCar, NewUser, Reservation, Stats};
use crate::messages::BackendRequest;

/// Handle to the `BackendService`. Closed channels surface as
/// `ApiError::Transport`.
#[derive(Clone)]
pub struct BackendClient {
    sender: mpsc::Sender<BackendRequest>,
}

impl BackendClient {
    pub fn new(sender: mpsc::Sender<BackendRequest>) -> Self {
        Self { sender }
    }
}

client_method!(BackendClient => fn list_cars(query: CarQuery) -> Vec<Car> as BackendRequest::ListCars, Error = ApiError);
client_method!(BackendClient => fn list_reservations() -> Vec<Reservation> as BackendRequest::ListReservations, Error = ApiError);
client_method!(BackendClient => fn get_stats() -> Stats as BackendRequest::GetStats, Error = ApiError);
client_method!(BackendClient => fn add_car(car: NewCar) -> () as BackendRequest::AddCar, Error = ApiError);
client_method!(BackendClient => fn delete_car(plate: String) -> () as BackendRequest::DeleteCar, Error = ApiError);
client_method!(BackendClient => fn add_cart_item(customer_id: String, item: CartItemRequest) -> CartItem as BackendRequest::AddCartItem, Error = ApiError);
client_method!(BackendClient => fn checkout(customer_id: String) -> CheckoutReceipt as BackendRequest::Checkout, Error = ApiError);
client_method!(BackendClient => fn create_users(users: Vec<NewUser>) -> u32 as BackendRequest::CreateUsers, Error = ApiError);
