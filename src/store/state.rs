use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use super::sequence::{Collection, SequenceBook, Ticket};
use super::StoreError;
use crate::domain::{
    nav_tabs, Car, Cart, CartItem, DashboardCards, DashboardSummary, NavTab, Notification,
    NotificationKind, Reservation, Role, SessionContext, Stats, View, ViewEffects,
};

/// Everything the client knows, owned by exactly one `StoreService`.
///
/// Carts are keyed by actor id so that switching away from the customer and
/// back again finds the same cart the server is holding for them.
#[derive(Debug)]
pub struct AppState {
    session: SessionContext,
    view: View,
    cars: Vec<Car>,
    reservations: Vec<Reservation>,
    stats: Stats,
    carts: HashMap<String, Cart>,
    dashboard: Option<DashboardSummary>,
    notification: Option<Notification>,
    notification_ttl: Duration,
    sequences: SequenceBook,
}

/// Read-only copy of the state handed out to callers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub session: SessionContext,
    pub view: View,
    pub nav_tabs: Vec<NavTab>,
    pub cars: Vec<Car>,
    /// Admin sees every reservation; a customer only their own.
    pub reservations: Vec<Reservation>,
    pub stats: Option<Stats>,
    pub cart: Vec<CartItem>,
    pub cart_total: String,
    pub dashboard: Option<DashboardSummary>,
    pub notification: Option<Notification>,
}

impl AppState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            session: SessionContext::default(),
            view: View::Dashboard,
            cars: Vec::new(),
            reservations: Vec::new(),
            stats: Stats::default(),
            carts: HashMap::new(),
            dashboard: None,
            notification: None,
            notification_ttl,
            sequences: SequenceBook::default(),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn view(&self) -> View {
        self.view
    }

    #[cfg(test)]
    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    #[cfg(test)]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Swaps identity and returns to the dashboard.
    pub fn switch_role(&mut self) -> &SessionContext {
        self.session = SessionContext::for_role(self.session.role.toggled());
        self.view = View::Dashboard;
        &self.session
    }

    pub fn navigate(&mut self, view: View) -> ViewEffects {
        self.view = view;
        view.entry_effects(self.session.role)
    }

    pub fn begin_fetch(&mut self, collection: Collection) -> Ticket {
        self.sequences.issue(collection)
    }

    pub fn apply_cars(&mut self, ticket: Ticket, cars: Vec<Car>) -> bool {
        debug_assert_eq!(ticket.collection, Collection::Cars);
        if !self.sequences.accept(ticket) {
            return false;
        }
        self.cars = cars;
        true
    }

    pub fn apply_reservations(&mut self, ticket: Ticket, reservations: Vec<Reservation>) -> bool {
        debug_assert_eq!(ticket.collection, Collection::Reservations);
        if !self.sequences.accept(ticket) {
            return false;
        }
        self.reservations = reservations;
        true
    }

    pub fn apply_stats(&mut self, ticket: Ticket, stats: Stats) -> bool {
        debug_assert_eq!(ticket.collection, Collection::Stats);
        if !self.sequences.accept(ticket) {
            return false;
        }
        self.stats = stats;
        true
    }

    pub fn find_car(&self, plate: &str) -> Option<&Car> {
        self.cars.iter().find(|c| c.plate == plate)
    }

    /// Cart of the active actor; admins never have one.
    pub fn active_cart(&self) -> Option<&Cart> {
        match self.session.role {
            Role::Customer => self.carts.get(&self.session.actor_id),
            Role::Admin => None,
        }
    }

    pub fn push_cart_item(&mut self, owner: &str, item: CartItem) -> usize {
        let cart = self.carts.entry(owner.to_string()).or_default();
        cart.push(item);
        cart.len()
    }

    pub fn remove_cart_item(&mut self, index: usize) -> Result<CartItem, StoreError> {
        if self.session.role != Role::Customer {
            return Err(StoreError::InvalidCartIndex(index));
        }
        let actor_id = &self.session.actor_id;
        let cart = self
            .carts
            .get_mut(actor_id)
            .ok_or(StoreError::InvalidCartIndex(index))?;
        let item = cart.remove(index).ok_or(StoreError::InvalidCartIndex(index))?;
        if cart.is_empty() {
            self.carts.remove(actor_id);
        }
        Ok(item)
    }

    pub fn cart_len(&self) -> usize {
        self.active_cart().map(Cart::len).unwrap_or(0)
    }

    pub fn clear_cart(&mut self, owner: &str) {
        if let Some(cart) = self.carts.get_mut(owner) {
            cart.clear();
        }
    }

    /// Replaces whatever notification is showing.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notification = Some(Notification::new(kind, message, self.notification_ttl));
    }

    pub fn active_notification(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_active_at(now))
    }

    fn visible_reservations(&self) -> Vec<Reservation> {
        match self.session.role {
            Role::Admin => self.reservations.clone(),
            Role::Customer => self
                .reservations
                .iter()
                .filter(|r| r.customer_id == self.session.actor_id)
                .cloned()
                .collect(),
        }
    }

    pub fn render_dashboard(&mut self, now: DateTime<Utc>) -> &DashboardSummary {
        let available = self.cars.iter().filter(|c| c.is_available()).count();
        let cards = match self.session.role {
            Role::Admin => DashboardCards::Admin(self.stats.clone()),
            Role::Customer => DashboardCards::Customer {
                available_cars: available,
                cart_items: self.cart_len(),
                my_bookings: self
                    .reservations
                    .iter()
                    .filter(|r| r.customer_id == self.session.actor_id)
                    .count(),
            },
        };
        self.dashboard.insert(DashboardSummary {
            cards,
            available_cars_text: format!("{} cars available for rental", available),
            last_sync: now,
        })
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        let cart = self.active_cart().cloned().unwrap_or_default();
        Snapshot {
            session: self.session.clone(),
            view: self.view,
            nav_tabs: nav_tabs(self.session.role).to_vec(),
            cars: self.cars.clone(),
            reservations: self.visible_reservations(),
            stats: self.session.is_admin().then(|| self.stats.clone()),
            cart: cart.items().to_vec(),
            cart_total: cart.display_total(),
            dashboard: self.dashboard.clone(),
            notification: self.active_notification(now).cloned(),
        }
    }
}
