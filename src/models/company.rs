//! Company model
//!
//! A company owns the per-km charges used to price tours and bookings.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::utils::money::Money;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub localcharge: Option<Money>,
    pub outstationcharge: Option<Money>,
    pub lumpsumcharge: Option<Money>,
    pub localdist: Option<Money>,
    pub outstationdistance: Option<Money>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanyPick {
    pub id: i64,
    pub name: String,
}

/// Per-km charges of a company
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct CompanyRates {
    pub localcharge: Option<Money>,
    pub outstationcharge: Option<Money>,
    pub lumpsumcharge: Option<Money>,
}
