//! Vehicle model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Availability of a vehicle, driven by booking status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VehicleAvailability {
    Available,
    OnBooking,
    Other(String),
}

impl VehicleAvailability {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleAvailability::Available => "Available",
            VehicleAvailability::OnBooking => "On Booking",
            VehicleAvailability::Other(value) => value,
        }
    }
}

impl From<String> for VehicleAvailability {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Available" => VehicleAvailability::Available,
            "On Booking" => VehicleAvailability::OnBooking,
            _ => VehicleAvailability::Other(value),
        }
    }
}

impl From<VehicleAvailability> for String {
    fn from(value: VehicleAvailability) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub company_id: Option<i64>,
    pub registration_number: String,
    pub make: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub capacity: Option<i32>,
    pub owner_driver_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    pub available_status: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Picklist row joined with the assigned and owner drivers
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehiclePick {
    pub id: i64,
    pub name: Option<String>,
    pub company: Option<String>,
    pub available_status: Option<String>,
    pub assigned_driver_id: Option<i64>,
    pub driver_name: Option<String>,
    pub driver_email: Option<String>,
    pub driver_status: Option<String>,
    pub driver_phone: Option<String>,
    pub owner_driver_id: Option<i64>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_status: Option<String>,
    pub owner_phone: Option<String>,
}
