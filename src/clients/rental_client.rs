use chrono::Utc;
use tracing::{debug, error, info, instrument, warn};

use crate::app_system::SyncError;
use crate::backend::ApiError;
use crate::clients::{BackendClient, StoreClient};
use crate::domain::{
    CarQuery, CartItem, CartItemRequest, CheckoutReceipt, DashboardSummary, NewCar, NewUser,
    NotificationKind, RentalWindow, Role, SessionContext, UserKind, View,
};
use crate::store::{Collection, Snapshot, StoreError};

/// User-facing operations, named the way failures are reported.
#[derive(Debug, Clone, Copy)]
enum Operation {
    FetchCars,
    FetchReservations,
    FetchStats,
    AddCar,
    DeleteCar,
    AddToCart,
    PlaceReservation,
    CreateUsers,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::FetchCars => "fetch cars",
            Operation::FetchReservations => "fetch reservations",
            Operation::FetchStats => "fetch stats",
            Operation::AddCar => "add car",
            Operation::DeleteCar => "delete car",
            Operation::AddToCart => "add to cart",
            Operation::PlaceReservation => "place reservation",
            Operation::CreateUsers => "create users",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Operation::FetchCars => "fetching cars",
            Operation::FetchReservations => "fetching reservations",
            Operation::FetchStats => "fetching stats",
            Operation::AddCar => "adding car",
            Operation::DeleteCar => "deleting car",
            Operation::AddToCart => "adding to cart",
            Operation::PlaceReservation => "placing reservation",
            Operation::CreateUsers => "creating users",
        }
    }
}

/// Local price preview for a cached car. The cart always uses the price the
/// server returns.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalEstimate {
    pub plate: String,
    pub days: i64,
    pub daily_price: f64,
    pub total: f64,
}

impl RentalEstimate {
    pub fn display_total(&self) -> String {
        format!("${:.2}", self.total)
    }
}

/// Keeps fetch failures (already reported to the user) from aborting the
/// surrounding flow, while still propagating a dead store.
fn tolerate_api<T>(result: Result<T, SyncError>) -> Result<(), SyncError> {
    match result {
        Ok(_) | Err(SyncError::Api(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Orchestrates the store and the backend the way the dashboard does:
/// fetches go out with a ticket, mutations resynchronise by refetching, and
/// every failure turns into a notification.
#[derive(Clone)]
pub struct RentalClient {
    store: StoreClient,
    backend: BackendClient,
}

impl RentalClient {
    pub fn new(store: StoreClient, backend: BackendClient) -> Self {
        Self { store, backend }
    }

    async fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        if let Err(e) = self.store.notify(kind, message.into()).await {
            warn!(error = %e, "Notification dropped");
        }
    }

    async fn warn_user(&self, err: SyncError) -> SyncError {
        self.notify(NotificationKind::Warning, err.to_string()).await;
        err
    }

    async fn report_failure(&self, op: Operation, err: ApiError) -> SyncError {
        error!(error = %err, "Error while {}", op.gerund());
        let message = match &err {
            ApiError::Logical(reason) => format!("Failed to {}: {}", op.verb(), reason),
            ApiError::Transport(_) => format!("Network error while {}", op.gerund()),
        };
        self.notify(NotificationKind::Error, message).await;
        SyncError::Api(err)
    }

    async fn require_role(&self, role: Role) -> Result<SessionContext, SyncError> {
        let session = self.store.session().await?;
        if session.role == role {
            return Ok(session);
        }
        let reason = match role {
            Role::Admin => "Admin access required",
            Role::Customer => "Customer access required",
        };
        Err(self.warn_user(SyncError::Forbidden(reason.to_string())).await)
    }

    // -------------------------------------------------------------------------
    // Session and navigation
    // -------------------------------------------------------------------------

    /// Loads the initial collections and lands on the dashboard.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<Snapshot, SyncError> {
        info!("Initializing client state");
        self.fetch_initial_data().await?;
        self.show(View::Dashboard).await?;
        Ok(self.store.snapshot().await?)
    }

    /// Cars for everyone, reservations and stats for admins, concurrently.
    #[instrument(skip(self))]
    pub async fn fetch_initial_data(&self) -> Result<DashboardSummary, SyncError> {
        let session = self.store.session().await?;
        if session.is_admin() {
            let (cars, reservations, stats) = tokio::join!(
                self.fetch_cars(None, None),
                self.fetch_reservations(),
                self.fetch_stats(),
            );
            tolerate_api(cars)?;
            tolerate_api(reservations)?;
            tolerate_api(stats)?;
        } else {
            tolerate_api(self.fetch_cars(None, None).await)?;
        }
        Ok(self.store.render_dashboard().await?)
    }

    #[instrument(skip(self))]
    pub async fn switch_role(&self) -> Result<SessionContext, SyncError> {
        let session = self.store.switch_role().await?;
        info!(role = %session.role, "Switched role");
        self.fetch_initial_data().await?;
        self.show(View::Dashboard).await?;
        self.notify(NotificationKind::Info, format!("Switched to {} role", session.role)).await;
        Ok(session)
    }

    /// Navigates by name. Unknown names are logged and leave the state alone.
    #[instrument(skip(self))]
    pub async fn show_view(&self, name: &str) -> Result<View, SyncError> {
        match View::parse(name) {
            Some(view) => self.show(view).await,
            None => {
                warn!(view = name, "Ignoring unknown view");
                Err(SyncError::UnknownView(name.to_string()))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn show(&self, view: View) -> Result<View, SyncError> {
        let effects = self.store.navigate(view).await?;
        if effects.cars {
            tolerate_api(self.fetch_cars(None, None).await)?;
        }
        if effects.reservations {
            tolerate_api(self.fetch_reservations().await)?;
        }
        if effects.stats {
            tolerate_api(self.fetch_stats().await)?;
        }
        if effects.dashboard {
            self.store.render_dashboard().await?;
        }
        Ok(view)
    }

    /// One tick of the polling loop.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<DashboardSummary, SyncError> {
        let session = self.store.session().await?;
        let view = self.store.current_view().await?;
        debug!(%view, role = %session.role, "Polling refresh");

        if view.polls_cars() {
            tolerate_api(self.fetch_cars(None, None).await)?;
        }
        if session.is_admin() && view.polls_admin_data() {
            tolerate_api(self.fetch_reservations().await)?;
            tolerate_api(self.fetch_stats().await)?;
        }
        Ok(self.store.render_dashboard().await?)
    }

    pub async fn snapshot(&self) -> Result<Snapshot, SyncError> {
        Ok(self.store.snapshot().await?)
    }

    // -------------------------------------------------------------------------
    // Remote data cache
    // -------------------------------------------------------------------------

    /// Replaces the cached car list. `Ok(false)` means a newer fetch had
    /// already landed and this response was dropped.
    #[instrument(skip(self))]
    pub async fn fetch_cars(&self, filter_text: Option<&str>, year_filter: Option<&str>) -> Result<bool, SyncError> {
        let query = CarQuery::new(filter_text, year_filter);
        let ticket = self.store.begin_fetch(Collection::Cars).await?;
        match self.backend.list_cars(query).await {
            Ok(cars) => {
                let count = cars.len();
                let applied = self.store.apply_cars(ticket, cars).await?;
                info!(count, applied, seq = ticket.seq, "Cars fetched");
                Ok(applied)
            }
            Err(e) => Err(self.report_failure(Operation::FetchCars, e).await),
        }
    }

    pub async fn search_cars(&self, text: &str, year: &str) -> Result<bool, SyncError> {
        self.fetch_cars(Some(text), Some(year)).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_reservations(&self) -> Result<bool, SyncError> {
        let ticket = self.store.begin_fetch(Collection::Reservations).await?;
        match self.backend.list_reservations().await {
            Ok(reservations) => {
                let count = reservations.len();
                let applied = self.store.apply_reservations(ticket, reservations).await?;
                info!(count, applied, seq = ticket.seq, "Reservations fetched");
                Ok(applied)
            }
            Err(e) => Err(self.report_failure(Operation::FetchReservations, e).await),
        }
    }

    #[instrument(skip(self))]
    pub async fn fetch_stats(&self) -> Result<bool, SyncError> {
        let ticket = self.store.begin_fetch(Collection::Stats).await?;
        match self.backend.get_stats().await {
            Ok(stats) => {
                let applied = self.store.apply_stats(ticket, stats).await?;
                info!(applied, seq = ticket.seq, "Stats fetched");
                Ok(applied)
            }
            Err(e) => Err(self.report_failure(Operation::FetchStats, e).await),
        }
    }

    /// Creates a car, then refetches the catalog instead of patching it.
    #[instrument(fields(plate = %car.plate), skip(self, car))]
    pub async fn add_car(&self, car: NewCar) -> Result<(), SyncError> {
        self.require_role(Role::Admin).await?;
        if let Err(reason) = car.validate() {
            return Err(self.warn_user(SyncError::Validation(reason)).await);
        }
        if let Err(e) = self.backend.add_car(car).await {
            return Err(self.report_failure(Operation::AddCar, e).await);
        }
        self.notify(NotificationKind::Success, "Car added successfully!").await;
        tolerate_api(self.fetch_cars(None, None).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_car(&self, plate: &str) -> Result<(), SyncError> {
        self.require_role(Role::Admin).await?;
        if let Err(e) = self.backend.delete_car(plate.to_string()).await {
            return Err(self.report_failure(Operation::DeleteCar, e).await);
        }
        self.notify(NotificationKind::Success, "Car deleted successfully!").await;
        tolerate_api(self.fetch_cars(None, None).await)
    }

    #[instrument(skip(self))]
    pub async fn create_batch_users(&self, kind: UserKind, count: u32) -> Result<u32, SyncError> {
        self.require_role(Role::Admin).await?;
        if count == 0 {
            return Err(self.warn_user(SyncError::Validation("User count must be at least 1".to_string())).await);
        }
        let users = NewUser::batch(kind, count, Utc::now().timestamp_millis());
        match self.backend.create_users(users).await {
            Ok(created) => {
                self.notify(NotificationKind::Success, format!("{} users created successfully!", created)).await;
                Ok(created)
            }
            Err(e) => Err(self.report_failure(Operation::CreateUsers, e).await),
        }
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Prices a rental window on the server and appends the returned line.
    /// Bad windows are rejected before any request is made.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, plate: &str, start: &str, end: &str) -> Result<CartItem, SyncError> {
        let session = self.require_role(Role::Customer).await?;
        let request = match CartItemRequest::parse(plate, start, end) {
            Ok(request) => request,
            Err(reason) => return Err(self.warn_user(SyncError::Validation(reason)).await),
        };

        let item = match self.backend.add_cart_item(session.actor_id.clone(), request).await {
            Ok(item) => item,
            Err(e) => return Err(self.report_failure(Operation::AddToCart, e).await),
        };

        // Owner is the actor who started the request, even if the role has
        // changed since.
        let len = self.store.push_cart_item(session.actor_id, item.clone()).await?;
        info!(cart_len = len, price = item.estimated_price, "Cart item priced");
        self.notify(NotificationKind::Success, "Car added to cart!").await;
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, index: usize) -> Result<CartItem, SyncError> {
        self.require_role(Role::Customer).await?;
        match self.store.remove_cart_item(index).await {
            Ok(item) => {
                self.notify(NotificationKind::Info, "Item removed from cart").await;
                Ok(item)
            }
            Err(e @ StoreError::InvalidCartIndex(_)) => Err(self.warn_user(SyncError::Store(e)).await),
            Err(e) => Err(e.into()),
        }
    }

    /// Checks out the whole cart. The cart is cleared only after the server
    /// accepts; on failure it is left as it was.
    #[instrument(skip(self))]
    pub async fn place_reservation(&self) -> Result<CheckoutReceipt, SyncError> {
        let session = self.require_role(Role::Customer).await?;
        if self.store.cart_len().await? == 0 {
            return Err(self.warn_user(SyncError::Validation("Cart is empty!".to_string())).await);
        }

        let receipt = match self.backend.checkout(session.actor_id.clone()).await {
            Ok(receipt) => receipt,
            Err(e) => return Err(self.report_failure(Operation::PlaceReservation, e).await),
        };

        self.store.clear_cart(session.actor_id).await?;
        tolerate_api(self.fetch_reservations().await)?;
        info!(total = receipt.total_amount, "Reservation placed");
        self.notify(
            NotificationKind::Success,
            format!("Reservation placed successfully! Total: ${:.2}", receipt.total_amount),
        )
        .await;
        Ok(receipt)
    }

    /// Previews `days * daily_price` for a cached car, counting both ends of
    /// the window. Nothing is sent and nothing is shown.
    pub async fn estimate_rental(&self, plate: &str, start: &str, end: &str) -> Result<RentalEstimate, SyncError> {
        let plate = plate.trim();
        if plate.is_empty() {
            return Err(SyncError::Validation("Please fill all required fields".to_string()));
        }
        let window = RentalWindow::parse(start, end).map_err(SyncError::Validation)?;
        let car = self
            .store
            .find_car(plate.to_string())
            .await?
            .ok_or_else(|| SyncError::Validation(format!("Car {} is not in the catalog", plate)))?;
        let days = window.days();
        Ok(RentalEstimate {
            plate: car.plate,
            days,
            daily_price: car.daily_price,
            total: days as f64 * car.daily_price,
        })
    }
}
