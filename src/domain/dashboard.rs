use chrono::{DateTime, Utc};
use super::Stats;

/// Headline numbers for the dashboard, shaped by role.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCards {
    Admin(Stats),
    Customer {
        available_cars: usize,
        cart_items: usize,
        my_bookings: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub cards: DashboardCards,
    pub available_cars_text: String,
    pub last_sync: DateTime<Utc>,
}
