//! # Mock Framework
//!
//! Utilities for testing `RentalClient` without a real HTTP server.
//!
//! [`create_mock_backend`] returns a `BackendClient` whose requests arrive on a
//! receiver the test owns. Use the `expect_*` helpers to assert on a request
//! and answer it, in whatever order the test needs. [`FakeServer`] answers
//! everything from an in-memory model for end-to-end scenarios.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::ApiError;
use crate::clients::{BackendClient, RentalClient};
use crate::domain::{
    Car, CarQuery, CarStatus, CartItem, CartItemRequest, CheckoutReceipt, NewCar, NewUser, Reservation, Stats,
};
use crate::messages::{BackendRequest, ServiceResponse};
use crate::store::{AppState, StoreService};

pub fn create_mock_backend(buffer_size: usize) -> (BackendClient, mpsc::Receiver<BackendRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (BackendClient::new(sender), receiver)
}

/// A `RentalClient` over a live store and a mock backend. No poller runs.
pub fn spawn_client() -> (RentalClient, mpsc::Receiver<BackendRequest>) {
    spawn_client_with(AppState::new(chrono::Duration::seconds(5)))
}

/// Same as [`spawn_client`], starting from a prepared state.
pub fn spawn_client_with(state: AppState) -> (RentalClient, mpsc::Receiver<BackendRequest>) {
    let (backend, receiver) = create_mock_backend(32);
    let (service, store) = StoreService::new(32, state);
    tokio::spawn(service.run());
    (RentalClient::new(store, backend), receiver)
}

pub async fn expect_list_cars(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(CarQuery, ServiceResponse<Vec<Car>, ApiError>)> {
    match receiver.recv().await {
        Some(BackendRequest::ListCars { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

pub async fn expect_list_reservations(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<ServiceResponse<Vec<Reservation>, ApiError>> {
    match receiver.recv().await {
        Some(BackendRequest::ListReservations { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_get_stats(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<ServiceResponse<Stats, ApiError>> {
    match receiver.recv().await {
        Some(BackendRequest::GetStats { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_add_car(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(NewCar, ServiceResponse<(), ApiError>)> {
    match receiver.recv().await {
        Some(BackendRequest::AddCar { car, respond_to }) => Some((car, respond_to)),
        _ => None,
    }
}

pub async fn expect_add_cart_item(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(String, CartItemRequest, ServiceResponse<CartItem, ApiError>)> {
    match receiver.recv().await {
        Some(BackendRequest::AddCartItem { customer_id, item, respond_to }) => Some((customer_id, item, respond_to)),
        _ => None,
    }
}

pub async fn expect_checkout(
    receiver: &mut mpsc::Receiver<BackendRequest>,
) -> Option<(String, ServiceResponse<CheckoutReceipt, ApiError>)> {
    match receiver.recv().await {
        Some(BackendRequest::Checkout { customer_id, respond_to }) => Some((customer_id, respond_to)),
        _ => None,
    }
}

/// In-memory stand-in for the rental API, including its server-side carts.
#[derive(Debug, Default)]
pub struct FakeServer {
    pub cars: Vec<Car>,
    pub reservations: Vec<Reservation>,
    pub carts: HashMap<String, Vec<CartItem>>,
    pub users: Vec<NewUser>,
    pub requests: usize,
    next_reservation: u64,
}

impl FakeServer {
    pub fn with_cars(cars: Vec<Car>) -> Self {
        Self { cars, ..Default::default() }
    }

    /// Serves until every `BackendClient` is dropped, then hands itself back.
    pub fn spawn(mut self, mut receiver: mpsc::Receiver<BackendRequest>) -> JoinHandle<FakeServer> {
        tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                self.handle(request);
            }
            self
        })
    }

    fn handle(&mut self, request: BackendRequest) {
        self.requests += 1;
        match request {
            BackendRequest::ListCars { query, respond_to } => {
                let _ = respond_to.send(Ok(self.list_cars(&query)));
            }
            BackendRequest::ListReservations { respond_to } => {
                let _ = respond_to.send(Ok(self.reservations.clone()));
            }
            BackendRequest::GetStats { respond_to } => {
                let _ = respond_to.send(Ok(self.stats()));
            }
            BackendRequest::AddCar { car, respond_to } => {
                let _ = respond_to.send(self.add_car(car));
            }
            BackendRequest::DeleteCar { plate, respond_to } => {
                let before = self.cars.len();
                self.cars.retain(|c| c.plate != plate);
                let result = if self.cars.len() < before {
                    Ok(())
                } else {
                    Err(ApiError::Logical("Car not found".to_string()))
                };
                let _ = respond_to.send(result);
            }
            BackendRequest::AddCartItem { customer_id, item, respond_to } => {
                let _ = respond_to.send(self.add_cart_item(customer_id, item));
            }
            BackendRequest::Checkout { customer_id, respond_to } => {
                let _ = respond_to.send(self.checkout(&customer_id));
            }
            BackendRequest::CreateUsers { users, respond_to } => {
                let created = users.len() as u32;
                self.users.extend(users);
                let _ = respond_to.send(Ok(created));
            }
        }
    }

    fn list_cars(&self, query: &CarQuery) -> Vec<Car> {
        self.cars
            .iter()
            .filter(|c| match &query.filter_text {
                Some(text) => {
                    let text = text.to_lowercase();
                    [&c.plate, &c.make, &c.model].iter().any(|f| f.to_lowercase().contains(&text))
                }
                None => true,
            })
            .filter(|c| match &query.year_filter {
                Some(year) => c.year.to_string() == *year,
                None => true,
            })
            .cloned()
            .collect()
    }

    fn stats(&self) -> Stats {
        let confirmed = self.reservations.iter().filter(|r| r.status == "CONFIRMED").count();
        Stats {
            total_cars: self.cars.len() as u64,
            available_cars: self.cars.iter().filter(|c| c.is_available()).count() as u64,
            rented_cars: self.cars.iter().filter(|c| c.status == CarStatus::Rented).count() as u64,
            total_reservations: self.reservations.len() as u64,
            confirmed_reservations: confirmed as u64,
            total_revenue: self.reservations.iter().map(|r| r.total_price).sum(),
        }
    }

    fn add_car(&mut self, car: NewCar) -> Result<(), ApiError> {
        if self.cars.iter().any(|c| c.plate == car.plate) {
            return Err(ApiError::Logical(format!("Car {} already exists", car.plate)));
        }
        self.cars.push(Car {
            plate: car.plate,
            make: car.make,
            model: car.model,
            year: car.year,
            mileage: car.mileage,
            daily_price: car.daily_price,
            status: car.status,
        });
        Ok(())
    }

    fn add_cart_item(&mut self, customer_id: String, item: CartItemRequest) -> Result<CartItem, ApiError> {
        let car = self
            .cars
            .iter()
            .find(|c| c.plate == item.plate)
            .ok_or_else(|| ApiError::Logical("Car not found".to_string()))?;
        if !car.is_available() {
            return Err(ApiError::Logical("Car is not available".to_string()));
        }
        let days = (item.end_date - item.start_date).num_days();
        let line = CartItem {
            plate: item.plate,
            start_date: item.start_date,
            end_date: item.end_date,
            estimated_price: days as f64 * car.daily_price,
        };
        self.carts.entry(customer_id).or_default().push(line.clone());
        Ok(line)
    }

    fn checkout(&mut self, customer_id: &str) -> Result<CheckoutReceipt, ApiError> {
        let lines = self.carts.remove(customer_id).unwrap_or_default();
        if lines.is_empty() {
            return Err(ApiError::Logical("Cart is empty".to_string()));
        }
        let mut total_amount = 0.0;
        for line in lines {
            self.next_reservation += 1;
            total_amount += line.estimated_price;
            if let Some(car) = self.cars.iter_mut().find(|c| c.plate == line.plate) {
                car.status = CarStatus::Rented;
            }
            self.reservations.push(Reservation {
                reservation_id: format!("res-{:08}", self.next_reservation),
                customer_id: customer_id.to_string(),
                plate: line.plate,
                start_date: line.start_date,
                end_date: line.end_date,
                total_price: line.estimated_price,
                status: "CONFIRMED".to_string(),
                created_at: "2024-01-01T00:00:00".to_string(),
            });
        }
        Ok(CheckoutReceipt { total_amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let (client, mut receiver) = create_mock_backend(4);

        let task = tokio::spawn(async move { client.list_cars(CarQuery::new(Some("vw"), None)).await });

        let (query, responder) = expect_list_cars(&mut receiver).await.expect("Expected ListCars");
        assert_eq!(query.filter_text.as_deref(), Some("vw"));
        responder.send(Err(ApiError::Logical("nope".into()))).unwrap();

        assert_eq!(task.await.unwrap(), Err(ApiError::Logical("nope".into())));
    }

    #[tokio::test]
    async fn test_closed_backend_is_transport() {
        let (client, receiver) = create_mock_backend(4);
        drop(receiver);
        assert!(client.get_stats().await.unwrap_err().is_transport());
    }
}
