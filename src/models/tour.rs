//! Tour model
//!
//! A tour is the priced trip offer a booking is created from. `price` and
//! `total_amount` are always derived server-side.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::money::Money;

/// Tour type, selects which company charge applies
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TourType {
    Local,
    Outstation,
    Lumpsum,
    /// Stored verbatim, resolves no rate
    Other(String),
}

impl TourType {
    pub fn as_str(&self) -> &str {
        match self {
            TourType::Local => "Local",
            TourType::Outstation => "Outstation",
            TourType::Lumpsum => "Lumpsum",
            TourType::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Local" => TourType::Local,
            "Outstation" => TourType::Outstation,
            "Lumpsum" => TourType::Lumpsum,
            other => TourType::Other(other.to_string()),
        }
    }

    /// Parses an optional stored column, `None` stays unrecognized
    pub fn from_column(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_else(|| TourType::Other(String::new()))
    }
}

impl From<String> for TourType {
    fn from(value: String) -> Self {
        TourType::parse(&value)
    }
}

impl From<TourType> for String {
    fn from(value: TourType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Tour {
    pub id: i64,
    pub name: Option<String>,
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub type_of_tour: Option<String>,
    pub description: Option<String>,
    pub start_state: Option<String>,
    pub end_state: Option<String>,
    pub start_city: Option<String>,
    pub end_city: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub distance_km: Option<Money>,
    pub premium: Option<Money>,
    pub price: Option<Money>,
    pub total_amount: Option<Money>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the tour listing
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TourSummary {
    pub id: i64,
    pub tour_name: Option<String>,
    pub lead_name: Option<String>,
    pub tour_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub lead_phone: Option<String>,
    pub lead_email: Option<String>,
}

/// Tour with its lead contact and the vehicle's current driver
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TourDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub tour: Tour,
    pub lead_name: Option<String>,
    pub lead_phone: Option<String>,
    pub lead_email: Option<String>,
    pub assigned_driver: Option<i64>,
}

/// Stored inputs of the tour price, read before a repricing update
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct TourPricingInputs {
    pub company_id: Option<i64>,
    pub type_of_tour: Option<String>,
    pub distance_km: Option<Money>,
    pub premium: Option<Money>,
    pub price: Option<Money>,
}

/// Tour columns copied into a new booking
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct TourSeed {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_km: Option<Money>,
    pub total_amount: Option<Money>,
    pub duration_days: Option<i32>,
    pub type_of_tour: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_type_round_trip_through_strings() {
        assert_eq!(TourType::parse("Local"), TourType::Local);
        assert_eq!(TourType::parse("Outstation"), TourType::Outstation);
        assert_eq!(TourType::parse("local"), TourType::Other("local".to_string()));
        assert_eq!(String::from(TourType::Lumpsum), "Lumpsum");
        assert_eq!(TourType::from_column(None), TourType::Other(String::new()));
    }

    #[test]
    fn test_tour_type_serde() {
        let t: TourType = serde_json::from_str("\"Outstation\"").unwrap();
        assert_eq!(t, TourType::Outstation);
        assert_eq!(serde_json::to_string(&TourType::Local).unwrap(), "\"Local\"");
    }
}
