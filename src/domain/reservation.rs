use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A confirmed booking as reported by the server. Immutable on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: String,
    pub customer_id: String,
    pub plate: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    #[serde(default)]
    pub created_at: String,
}

impl Reservation {
    /// Last eight characters of the id, as shown on reservation cards.
    pub fn short_id(&self) -> &str {
        let id = self.reservation_id.as_str();
        match id.char_indices().rev().nth(7) {
            Some((idx, _)) => &id[idx..],
            None => id,
        }
    }
}

/// Checkout reply: the server computes the aggregate total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub total_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        let mut r: Reservation = serde_json::from_value(serde_json::json!({
            "reservation_id": "res-0000-12345678",
            "customer_id": "customer1",
            "plate": "ABC123",
            "start_date": "2024-01-01",
            "end_date": "2024-01-03",
            "total_price": 120.0,
            "status": "CONFIRMED"
        }))
        .unwrap();
        assert_eq!(r.short_id(), "12345678");
        assert_eq!(r.created_at, "");

        r.reservation_id = "r1".into();
        assert_eq!(r.short_id(), "r1");
    }
}
