use serde::{Deserialize, Serialize};

/// Server-reported availability of a car. The client never transitions this
/// locally; it only mirrors what the last applied fetch returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
    #[serde(other)]
    Other,
}

/// A car in the rental catalog, keyed by its plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub daily_price: f64,
    pub status: CarStatus,
}

impl Car {
    pub fn is_available(&self) -> bool {
        self.status == CarStatus::Available
    }
}

/// Payload for `POST /admin/cars`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCar {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u32,
    pub daily_price: f64,
    pub status: CarStatus,
}

impl NewCar {
    pub fn new(
        plate: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year: i32,
        mileage: u32,
        daily_price: f64,
    ) -> Self {
        Self {
            plate: plate.into(),
            make: make.into(),
            model: model.into(),
            year,
            mileage,
            daily_price,
            status: CarStatus::Available,
        }
    }

    pub fn with_status(mut self, status: CarStatus) -> Self {
        self.status = status;
        self
    }

    /// Checks the fields the add-car form requires before anything is sent.
    pub fn validate(&self) -> Result<(), String> {
        if self.plate.trim().is_empty() {
            return Err("Plate is required".to_string());
        }
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err("Make and model are required".to_string());
        }
        if !(self.daily_price.is_finite() && self.daily_price > 0.0) {
            return Err("Daily price must be positive".to_string());
        }
        Ok(())
    }
}

/// Catalog filters; empty values are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarQuery {
    pub filter_text: Option<String>,
    pub year_filter: Option<String>,
}

impl CarQuery {
    pub fn new(filter_text: Option<&str>, year_filter: Option<&str>) -> Self {
        let keep = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            filter_text: keep(filter_text),
            year_filter: keep(year_filter),
        }
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(text) = &self.filter_text {
            params.push(("filter_text", text.clone()));
        }
        if let Some(year) = &self.year_filter {
            params.push(("year_filter", year.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let car: Car = serde_json::from_str(
            r#"{"plate":"ABC123","make":"Toyota","model":"Corolla","year":2022,
                "mileage":1000,"daily_price":40.0,"status":"AVAILABLE"}"#,
        )
        .unwrap();
        assert!(car.is_available());

        let odd: CarStatus = serde_json::from_str(r#""IN_TRANSIT""#).unwrap();
        assert_eq!(odd, CarStatus::Other);
    }

    #[test]
    fn test_query_drops_blank_filters() {
        let query = CarQuery::new(Some("  "), Some("2022"));
        assert_eq!(query.to_params(), vec![("year_filter", "2022".to_string())]);
        assert!(CarQuery::default().to_params().is_empty());
    }

    #[test]
    fn test_new_car_validation() {
        assert!(NewCar::new("ABC123", "Toyota", "Corolla", 2022, 1000, 40.0).validate().is_ok());
        assert!(NewCar::new("", "Toyota", "Corolla", 2022, 1000, 40.0).validate().is_err());
        assert!(NewCar::new("X1", "Toyota", "Corolla", 2022, 1000, 0.0).validate().is_err());
    }
}
