use std::future::Future;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, Instrument};

use super::{ApiError, HttpApi};
use crate::clients::BackendClient;
use crate::messages::{BackendRequest, ServiceResponse};

/// Actor in front of the REST API. Each request runs on its own task, so a
/// slow call never holds up the next one and responses may land in any order.
pub struct BackendService {
    receiver: mpsc::Receiver<BackendRequest>,
    api: HttpApi,
}

impl BackendService {
    pub fn new(buffer_size: usize, api: HttpApi) -> (Self, BackendClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, api };
        (service, BackendClient::new(sender))
    }

    #[instrument(name = "backend_service", skip(self))]
    pub async fn run(mut self) {
        info!("BackendService starting");
        while let Some(msg) = self.receiver.recv().await {
            self.dispatch(msg);
        }
        info!("BackendService stopped");
    }

    fn dispatch(&self, msg: BackendRequest) {
        let api = self.api.clone();
        match msg {
            BackendRequest::ListCars { query, respond_to } => {
                spawn_call("list_cars", respond_to, async move { api.list_cars(&query).await });
            }
            BackendRequest::ListReservations { respond_to } => {
                spawn_call("list_reservations", respond_to, async move { api.list_reservations().await });
            }
            BackendRequest::GetStats { respond_to } => {
                spawn_call("get_stats", respond_to, async move { api.get_stats().await });
            }
            BackendRequest::AddCar { car, respond_to } => {
                spawn_call("add_car", respond_to, async move { api.add_car(&car).await });
            }
            BackendRequest::DeleteCar { plate, respond_to } => {
                spawn_call("delete_car", respond_to, async move { api.delete_car(&plate).await });
            }
            BackendRequest::AddCartItem { customer_id, item, respond_to } => {
                spawn_call("add_cart_item", respond_to, async move {
                    api.add_cart_item(&customer_id, &item).await
                });
            }
            BackendRequest::Checkout { customer_id, respond_to } => {
                spawn_call("checkout", respond_to, async move { api.checkout(&customer_id).await });
            }
            BackendRequest::CreateUsers { users, respond_to } => {
                spawn_call("create_users", respond_to, async move { api.create_users(&users).await });
            }
        }
    }
}

/// The spawned task owns `respond_to` and answers once the call completes.
fn spawn_call<T, F>(endpoint: &'static str, respond_to: ServiceResponse<T, ApiError>, call: F)
where
    T: Send + 'static,
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    let span = tracing::debug_span!("backend_call", endpoint);
    tokio::spawn(
        async move {
            let result = call.await;
            if let Err(e) = &result {
                debug!(error = %e, "Call failed");
            }
            let _ = respond_to.send(result);
        }
        .instrument(span),
    );
}
