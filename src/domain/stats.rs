use serde::{Deserialize, Serialize};

/// Admin-only aggregate counters. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_cars: u64,
    pub available_cars: u64,
    pub rented_cars: u64,
    pub total_reservations: u64,
    pub confirmed_reservations: u64,
    pub total_revenue: f64,
}
