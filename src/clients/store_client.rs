use tokio::sync::mpsc;

use crate::domain::{Car, CartItem, DashboardSummary, NotificationKind, Reservation, SessionContext, Stats, View, ViewEffects};
use crate::messages::StoreRequest;
use crate::store::{Collection, Snapshot, StoreError, Ticket};

/// Handle to the `StoreService`.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    pub async fn shutdown(&self) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(StoreClient => fn session() -> SessionContext as StoreRequest::GetSession, Error = StoreError);
client_method!(StoreClient => fn switch_role() -> SessionContext as StoreRequest::SwitchRole, Error = StoreError);
client_method!(StoreClient => fn navigate(view: View) -> ViewEffects as StoreRequest::Navigate, Error = StoreError);
client_method!(StoreClient => fn current_view() -> View as StoreRequest::CurrentView, Error = StoreError);
client_method!(StoreClient => fn begin_fetch(collection: Collection) -> Ticket as StoreRequest::BeginFetch, Error = StoreError);
client_method!(StoreClient => fn apply_cars(ticket: Ticket, cars: Vec<Car>) -> bool as StoreRequest::ApplyCars, Error = StoreError);
client_method!(StoreClient => fn apply_reservations(ticket: Ticket, reservations: Vec<Reservation>) -> bool as StoreRequest::ApplyReservations, Error = StoreError);
client_method!(StoreClient => fn apply_stats(ticket: Ticket, stats: Stats) -> bool as StoreRequest::ApplyStats, Error = StoreError);
client_method!(StoreClient => fn find_car(plate: String) -> Option<Car> as StoreRequest::FindCar, Error = StoreError);
client_method!(StoreClient => fn push_cart_item(owner: String, item: CartItem) -> usize as StoreRequest::PushCartItem, Error = StoreError);
client_method!(StoreClient => fn remove_cart_item(index: usize) -> CartItem as StoreRequest::RemoveCartItem, Error = StoreError);
client_method!(StoreClient => fn cart_len() -> usize as StoreRequest::CartLen, Error = StoreError);
client_method!(StoreClient => fn clear_cart(owner: String) -> () as StoreRequest::ClearCart, Error = StoreError);
client_method!(StoreClient => fn notify(kind: NotificationKind, message: String) -> () as StoreRequest::Notify, Error = StoreError);
client_method!(StoreClient => fn render_dashboard() -> DashboardSummary as StoreRequest::RenderDashboard, Error = StoreError);
client_method!(StoreClient => fn snapshot() -> Snapshot as StoreRequest::Snapshot, Error = StoreError);
