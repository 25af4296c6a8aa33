use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use super::{AppState, StoreError, Ticket};
use crate::clients::StoreClient;
use crate::domain::{Car, CartItem, NotificationKind, Reservation, Stats, View, ViewEffects};
use crate::messages::{ServiceResponse, StoreRequest};

/// Single owner of the client state. Every mutation happens inside one
/// handler call, so there is no locking; ordering between concurrent fetches
/// is settled by the tickets in `AppState`.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    state: AppState,
}

impl StoreService {
    pub fn new(buffer_size: usize, state: AppState) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, state };
        (service, StoreClient::new(sender))
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::GetSession { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.session().clone()));
                }
                StoreRequest::SwitchRole { respond_to } => {
                    let session = self.state.switch_role().clone();
                    info!(role = %session.role, actor_id = %session.actor_id, "Role switched");
                    let _ = respond_to.send(Ok(session));
                }
                StoreRequest::Navigate { view, respond_to } => {
                    self.handle_navigate(view, respond_to);
                }
                StoreRequest::CurrentView { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.view()));
                }
                StoreRequest::BeginFetch { collection, respond_to } => {
                    let ticket = self.state.begin_fetch(collection);
                    debug!(%collection, seq = ticket.seq, "Fetch ticket issued");
                    let _ = respond_to.send(Ok(ticket));
                }
                StoreRequest::ApplyCars { ticket, cars, respond_to } => {
                    self.handle_apply_cars(ticket, cars, respond_to);
                }
                StoreRequest::ApplyReservations { ticket, reservations, respond_to } => {
                    self.handle_apply_reservations(ticket, reservations, respond_to);
                }
                StoreRequest::ApplyStats { ticket, stats, respond_to } => {
                    self.handle_apply_stats(ticket, stats, respond_to);
                }
                StoreRequest::FindCar { plate, respond_to } => {
                    let _ = respond_to.send(Ok(self.state.find_car(&plate).cloned()));
                }
                StoreRequest::PushCartItem { owner, item, respond_to } => {
                    self.handle_push_cart_item(owner, item, respond_to);
                }
                StoreRequest::RemoveCartItem { index, respond_to } => {
                    self.handle_remove_cart_item(index, respond_to);
                }
                StoreRequest::CartLen { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.cart_len()));
                }
                StoreRequest::ClearCart { owner, respond_to } => {
                    self.state.clear_cart(&owner);
                    info!(owner = %owner, "Cart cleared");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Notify { kind, message, respond_to } => {
                    self.handle_notify(kind, message, respond_to);
                }
                StoreRequest::RenderDashboard { respond_to } => {
                    let summary = self.state.render_dashboard(Utc::now()).clone();
                    debug!(text = %summary.available_cars_text, "Dashboard rendered");
                    let _ = respond_to.send(Ok(summary));
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.snapshot(Utc::now())));
                }
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
            }
        }

        info!("StoreService stopped");
    }

    #[instrument(fields(view = %view), skip(self, respond_to))]
    fn handle_navigate(&mut self, view: View, respond_to: ServiceResponse<ViewEffects, StoreError>) {
        let effects = self.state.navigate(view);
        debug!(?effects, "View entered");
        let _ = respond_to.send(Ok(effects));
    }

    #[instrument(fields(seq = ticket.seq, count = cars.len()), skip(self, cars, respond_to))]
    fn handle_apply_cars(&mut self, ticket: Ticket, cars: Vec<Car>, respond_to: ServiceResponse<bool, StoreError>) {
        let applied = self.state.apply_cars(ticket, cars);
        if !applied {
            debug!("Stale cars response discarded");
        }
        let _ = respond_to.send(Ok(applied));
    }

    #[instrument(fields(seq = ticket.seq, count = reservations.len()), skip(self, reservations, respond_to))]
    fn handle_apply_reservations(
        &mut self,
        ticket: Ticket,
        reservations: Vec<Reservation>,
        respond_to: ServiceResponse<bool, StoreError>,
    ) {
        let applied = self.state.apply_reservations(ticket, reservations);
        if !applied {
            debug!("Stale reservations response discarded");
        }
        let _ = respond_to.send(Ok(applied));
    }

    #[instrument(fields(seq = ticket.seq), skip(self, stats, respond_to))]
    fn handle_apply_stats(&mut self, ticket: Ticket, stats: Stats, respond_to: ServiceResponse<bool, StoreError>) {
        let applied = self.state.apply_stats(ticket, stats);
        if !applied {
            debug!("Stale stats response discarded");
        }
        let _ = respond_to.send(Ok(applied));
    }

    #[instrument(fields(owner = %owner, plate = %item.plate), skip(self, item, respond_to))]
    fn handle_push_cart_item(&mut self, owner: String, item: CartItem, respond_to: ServiceResponse<usize, StoreError>) {
        let len = self.state.push_cart_item(&owner, item);
        info!(cart_len = len, "Cart item added");
        let _ = respond_to.send(Ok(len));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_cart_item(&mut self, index: usize, respond_to: ServiceResponse<CartItem, StoreError>) {
        let result = self.state.remove_cart_item(index);
        match &result {
            Ok(item) => info!(plate = %item.plate, "Cart item removed"),
            Err(e) => debug!(error = %e, "Cart item not removed"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(kind = ?kind), skip(self, message, respond_to))]
    fn handle_notify(&mut self, kind: NotificationKind, message: String, respond_to: ServiceResponse<(), StoreError>) {
        info!(message = %message, "Notification shown");
        self.state.notify(kind, message);
        let _ = respond_to.send(Ok(()));
    }
}
