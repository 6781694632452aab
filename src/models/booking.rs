//! Booking model
//!
//! Rows of the `bookings` table, the joined snapshot the recalculator works
//! from, and the status vocabulary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::company::CompanyRates;
use crate::models::tour::TourType;
use crate::utils::money::Money;

/// Booking status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    InProcess,
    Completed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::InProcess => "In Process",
            BookingStatus::Completed => "Completed",
            BookingStatus::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "In Process" => BookingStatus::InProcess,
            "Completed" => BookingStatus::Completed,
            other => BookingStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        BookingStatus::parse(&value)
    }
}

impl From<BookingStatus> for String {
    fn from(value: BookingStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub name: Option<String>,
    pub lead_id: Option<i64>,
    pub tour_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub company_id: Option<i64>,
    pub status: Option<String>,
    pub type_of_tour: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub booking_end_date: Option<NaiveDate>,
    pub duration: Option<i32>,
    pub actual_duration: Option<i32>,
    pub booked_distance_km: Option<Money>,
    pub total_amount: Option<Money>,
    pub actual_distance_km: Option<Money>,
    pub actual_total_amount: Option<Money>,
    pub amount_paid: Option<Money>,
    pub outstanding_amount: Option<Money>,
    pub expenses: Option<Money>,
    pub toll_tax: Option<Money>,
    pub profit: Option<Money>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the booking listing
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingSummary {
    pub id: i64,
    pub name: Option<String>,
    pub tour_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: Option<String>,
    pub lead_name: Option<String>,
    pub tour_name: Option<String>,
}

/// Booking with its lead contact and the tour baseline
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookingDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub lead_phone: Option<String>,
    pub lead_email: Option<String>,
    pub tour_total_amount: Option<Money>,
}

/// Prior state of a booking joined with its company charges and the
/// current driver of its vehicle
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct BookingSnapshot {
    pub id: i64,
    pub total_amount: Option<Money>,
    pub actual_total_amount: Option<Money>,
    pub booked_distance_km: Option<Money>,
    pub actual_distance_km: Option<Money>,
    pub amount_paid: Option<Money>,
    pub outstanding_amount: Option<Money>,
    pub expenses: Option<Money>,
    pub toll_tax: Option<Money>,
    pub profit: Option<Money>,
    pub type_of_tour: Option<String>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub status: Option<String>,
    pub version: i32,
    pub localcharge: Option<Money>,
    pub outstationcharge: Option<Money>,
    pub lumpsumcharge: Option<Money>,
    pub vehicle_assigned_driver_id: Option<i64>,
}

impl BookingSnapshot {
    pub fn rates(&self) -> CompanyRates {
        CompanyRates {
            localcharge: self.localcharge,
            outstationcharge: self.outstationcharge,
            lumpsumcharge: self.lumpsumcharge,
        }
    }

    pub fn tour_type(&self) -> TourType {
        TourType::from_column(self.type_of_tour.as_deref())
    }
}

/// Full column set of a booking insert
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewBooking {
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub tour_id: i64,
    pub booking_date: Option<NaiveDate>,
    pub booking_end_date: Option<NaiveDate>,
    pub booked_distance_km: Option<Money>,
    pub total_amount: Option<Money>,
    pub actual_total_amount: Option<Money>,
    pub duration: Option<i32>,
    pub type_of_tour: Option<String>,
    pub status: String,
    pub actual_distance_km: Option<Money>,
    pub amount_paid: Option<Money>,
    pub actual_duration: Option<i32>,
    pub expenses: Option<Money>,
    pub toll_tax: Option<Money>,
    pub outstanding_amount: Money,
    pub profit: Option<Money>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(BookingStatus::parse("In Process"), BookingStatus::InProcess);
        assert_eq!(BookingStatus::parse("Completed"), BookingStatus::Completed);
        assert_eq!(
            BookingStatus::parse("Cancelled"),
            BookingStatus::Other("Cancelled".to_string())
        );
        assert_eq!(BookingStatus::InProcess.as_str(), "In Process");
    }

    #[test]
    fn test_snapshot_rates_and_type() {
        let snapshot = BookingSnapshot {
            type_of_tour: Some("Local".to_string()),
            localcharge: Some(Money::from(50)),
            ..Default::default()
        };
        assert_eq!(snapshot.tour_type(), TourType::Local);
        assert_eq!(snapshot.rates().localcharge, Some(Money::from(50)));
        assert_eq!(snapshot.rates().outstationcharge, None);
    }
}
