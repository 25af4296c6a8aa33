use tokio::sync::oneshot;
use crate::backend::ApiError;
use crate::domain::{
    Car, CarQuery, CartItem, CartItemRequest, CheckoutReceipt, DashboardSummary, NewCar, NewUser,
    NotificationKind, Reservation, SessionContext, Stats, View, ViewEffects,
};
use crate::store::{Collection, Snapshot, StoreError, Ticket};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Error types that can describe a dead actor channel.
pub trait ChannelError {
    fn channel(reason: &str) -> Self;
}

impl ChannelError for ApiError {
    fn channel(reason: &str) -> Self {
        ApiError::Transport(reason.to_string())
    }
}

impl ChannelError for StoreError {
    fn channel(reason: &str) -> Self {
        StoreError::ActorCommunicationError(reason.to_string())
    }
}

/// One variant per REST endpoint the client consumes.
#[derive(Debug)]
pub enum BackendRequest {
    ListCars {
        query: CarQuery,
        respond_to: ServiceResponse<Vec<Car>, ApiError>,
    },
    ListReservations {
        respond_to: ServiceResponse<Vec<Reservation>, ApiError>,
    },
    GetStats {
        respond_to: ServiceResponse<Stats, ApiError>,
    },
    AddCar {
        car: NewCar,
        respond_to: ServiceResponse<(), ApiError>,
    },
    DeleteCar {
        plate: String,
        respond_to: ServiceResponse<(), ApiError>,
    },
    AddCartItem {
        customer_id: String,
        item: CartItemRequest,
        respond_to: ServiceResponse<CartItem, ApiError>,
    },
    Checkout {
        customer_id: String,
        respond_to: ServiceResponse<CheckoutReceipt, ApiError>,
    },
    CreateUsers {
        users: Vec<NewUser>,
        respond_to: ServiceResponse<u32, ApiError>,
    },
}

/// Requests to the actor that owns all client-side state.
#[derive(Debug)]
pub enum StoreRequest {
    GetSession {
        respond_to: ServiceResponse<SessionContext, StoreError>,
    },
    SwitchRole {
        respond_to: ServiceResponse<SessionContext, StoreError>,
    },
    Navigate {
        view: View,
        respond_to: ServiceResponse<ViewEffects, StoreError>,
    },
    CurrentView {
        respond_to: ServiceResponse<View, StoreError>,
    },
    BeginFetch {
        collection: Collection,
        respond_to: ServiceResponse<Ticket, StoreError>,
    },
    ApplyCars {
        ticket: Ticket,
        cars: Vec<Car>,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    ApplyReservations {
        ticket: Ticket,
        reservations: Vec<Reservation>,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    ApplyStats {
        ticket: Ticket,
        stats: Stats,
        respond_to: ServiceResponse<bool, StoreError>,
    },
    FindCar {
        plate: String,
        respond_to: ServiceResponse<Option<Car>, StoreError>,
    },
    PushCartItem {
        owner: String,
        item: CartItem,
        respond_to: ServiceResponse<usize, StoreError>,
    },
    RemoveCartItem {
        index: usize,
        respond_to: ServiceResponse<CartItem, StoreError>,
    },
    CartLen {
        respond_to: ServiceResponse<usize, StoreError>,
    },
    ClearCart {
        owner: String,
        respond_to: ServiceResponse<(), StoreError>,
    },
    Notify {
        kind: NotificationKind,
        message: String,
        respond_to: ServiceResponse<(), StoreError>,
    },
    RenderDashboard {
        respond_to: ServiceResponse<DashboardSummary, StoreError>,
    },
    Snapshot {
        respond_to: ServiceResponse<Snapshot, StoreError>,
    },
    Shutdown,
}
