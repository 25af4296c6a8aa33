use reqwest::{Client, Response};
use tracing::{debug, instrument};

use super::envelope::{decode_ack, decode_data, decode_users_created};
use super::ApiError;
use crate::domain::{Car, CarQuery, CartItem, CartItemRequest, CheckoutReceipt, NewCar, NewUser, Reservation, Stats};

/// Thin REST consumer for the rental backend. Timeouts are reqwest's
/// defaults; nothing is retried.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read(response: Response) -> Result<(reqwest::StatusCode, String), ApiError> {
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Response received");
        Ok((status, body))
    }

    #[instrument(skip(self))]
    pub async fn list_cars(&self, query: &CarQuery) -> Result<Vec<Car>, ApiError> {
        let response = self.client.get(self.url("/cars")).query(&query.to_params()).send().await?;
        let (status, body) = Self::read(response).await?;
        decode_data(status, &body)
    }

    #[instrument(skip(self))]
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        let response = self.client.get(self.url("/admin/reservations")).send().await?;
        let (status, body) = Self::read(response).await?;
        decode_data(status, &body)
    }

    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<Stats, ApiError> {
        let response = self.client.get(self.url("/admin/stats")).send().await?;
        let (status, body) = Self::read(response).await?;
        decode_data(status, &body)
    }

    #[instrument(fields(plate = %car.plate), skip(self, car))]
    pub async fn add_car(&self, car: &NewCar) -> Result<(), ApiError> {
        let response = self.client.post(self.url("/admin/cars")).json(car).send().await?;
        let (status, body) = Self::read(response).await?;
        decode_ack(status, &body)
    }

    #[instrument(skip(self))]
    pub async fn delete_car(&self, plate: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.url(&format!("/admin/cars/{}", plate)))
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        decode_ack(status, &body)
    }

    #[instrument(fields(plate = %item.plate), skip(self, item))]
    pub async fn add_cart_item(&self, customer_id: &str, item: &CartItemRequest) -> Result<CartItem, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/customers/{}/cart", customer_id)))
            .json(item)
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        decode_data(status, &body)
    }

    /// The server checks out its own copy of the cart; no body is sent.
    #[instrument(skip(self))]
    pub async fn checkout(&self, customer_id: &str) -> Result<CheckoutReceipt, ApiError> {
        let response = self
            .client
            .post(self.url(&format!("/customers/{}/reservations", customer_id)))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        decode_data(status, &body)
    }

    #[instrument(fields(count = users.len()), skip(self, users))]
    pub async fn create_users(&self, users: &[NewUser]) -> Result<u32, ApiError> {
        let response = self
            .client
            .post(self.url("/admin/users"))
            .json(&serde_json::json!({ "users": users }))
            .send()
            .await?;
        let (status, body) = Self::read(response).await?;
        decode_users_created(status, &body)
    }
}
