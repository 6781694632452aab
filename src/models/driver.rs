//! Driver model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Driver availability, driven by booking status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DriverStatus {
    Available,
    NotAvailable,
    Other(String),
}

impl DriverStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DriverStatus::Available => "Available",
            DriverStatus::NotAvailable => "Not Available",
            DriverStatus::Other(value) => value,
        }
    }
}

impl From<String> for DriverStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Available" => DriverStatus::Available,
            "Not Available" => DriverStatus::NotAvailable,
            _ => DriverStatus::Other(value),
        }
    }
}

impl From<DriverStatus> for String {
    fn from(value: DriverStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub license_number: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub aadhar_card: Option<String>,
    pub company_id: Option<i64>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DriverPick {
    pub id: i64,
    pub name: String,
    pub status: Option<String>,
}
