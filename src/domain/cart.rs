use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A priced, not-yet-booked rental line. Price comes from the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub plate: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_price: f64,
}

/// Body of `POST /customers/{id}/cart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItemRequest {
    pub plate: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CartItemRequest {
    /// Parses and checks the rental window. Nothing reaches the network
    /// unless `start < end`.
    pub fn parse(plate: &str, start: &str, end: &str) -> Result<Self, String> {
        let plate = plate.trim();
        if plate.is_empty() || start.trim().is_empty() || end.trim().is_empty() {
            return Err("Please fill all required fields".to_string());
        }
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if start_date >= end_date {
            return Err("End date must be after start date".to_string());
        }
        Ok(Self {
            plate: plate.to_string(),
            start_date,
            end_date,
        })
    }
}

/// Inclusive date range for a local price preview. A same-day rental is
/// one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl RentalWindow {
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err("Please fill all required fields".to_string());
        }
        let start_date = parse_date(start)?;
        let end_date = parse_date(end)?;
        if end_date < start_date {
            return Err("End date cannot be before start date".to_string());
        }
        Ok(Self { start_date, end_date })
    }

    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", raw.trim(), e))
}

/// Client-held cart, reconciled with the server only at checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, item: CartItem) {
        self.items.push(item);
    }

    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|i| i.estimated_price).sum()
    }

    /// Total as displayed: dollars with two decimals.
    pub fn display_total(&self) -> String {
        format!("${:.2}", self.total())
    }
}
