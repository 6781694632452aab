//! Booking request bodies
//!
//! Amounts arrive as raw JSON values so that a non-numeric or negative
//! amount is reported as `InvalidAmount` before any recomputation starts.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::services::booking_calculator::BookingPatch;
use crate::services::booking_service::BookingDraft;
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::field::Field;
use crate::utils::money::Money;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub vehicle_id: Field<i64>,
    /// Derived from the vehicle, never taken from the client
    #[serde(default)]
    pub driver_id: Field<Value>,
    /// Fixed at creation
    #[serde(default)]
    pub type_of_tour: Field<Value>,
    #[serde(default)]
    pub actual_distance_km: Field<Value>,
    #[serde(default)]
    pub amount_paid: Field<Value>,
    #[serde(default)]
    pub expenses: Field<Value>,
    #[serde(default)]
    pub toll_tax: Field<Value>,
    #[serde(default)]
    pub company_id: Field<i64>,
    #[serde(default)]
    pub lead_id: Field<i64>,
    #[serde(default)]
    pub tour_id: Field<i64>,
    #[serde(default)]
    pub booking_date: Field<NaiveDate>,
    #[serde(default)]
    pub booking_end_date: Field<NaiveDate>,
    #[serde(default)]
    pub booked_distance_km: Field<Value>,
    #[serde(default)]
    pub total_amount: Field<Value>,
    #[serde(default)]
    pub status: Field<String>,
}

/// Amount that must carry a value when present
fn required_amount(name: &str, field: &Field<Value>, non_negative: bool) -> AppResult<Option<Money>> {
    match field {
        Field::Absent => Ok(None),
        Field::Null => Err(AppError::InvalidAmount(format!("{} must be numeric, got null", name))),
        Field::Value(value) if non_negative => Money::parse_non_negative(name, value).map(Some),
        Field::Value(value) => Money::parse(name, value).map(Some),
    }
}

impl UpdateBookingRequest {
    pub fn into_patch(self) -> AppResult<BookingPatch> {
        if self.driver_id.is_present() {
            debug!("Ignoring client driver_id, it follows the vehicle");
        }
        if self.type_of_tour.is_present() {
            debug!("Ignoring type_of_tour on booking update");
        }

        Ok(BookingPatch {
            actual_distance_km: required_amount("actual_distance_km", &self.actual_distance_km, true)?,
            amount_paid: required_amount("amount_paid", &self.amount_paid, true)?,
            expenses: required_amount("expenses", &self.expenses, true)?,
            toll_tax: required_amount("toll_tax", &self.toll_tax, true)?,
            booked_distance_km: Money::parse_field("booked_distance_km", self.booked_distance_km, true)?,
            total_amount: Money::parse_field("total_amount", self.total_amount, false)?,
            vehicle_id: self.vehicle_id,
            company_id: self.company_id,
            lead_id: self.lead_id,
            tour_id: self.tour_id,
            booking_date: self.booking_date,
            booking_end_date: self.booking_end_date,
            status: self.status,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateBookingRequest {
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    #[serde(default)]
    pub vehicle_id: Field<i64>,
    pub tour_id: Option<i64>,
    #[serde(default)]
    pub actual_distance_km: Field<Value>,
    #[serde(default)]
    pub amount_paid: Field<Value>,
    pub actual_duration: Option<i32>,
    #[serde(default)]
    pub expenses: Field<Value>,
    #[serde(default)]
    pub toll_tax: Field<Value>,
}

impl CreateBookingRequest {
    fn is_empty(&self) -> bool {
        self.company_id.is_none()
            && self.lead_id.is_none()
            && self.vehicle_id.is_absent()
            && self.tour_id.is_none()
            && self.actual_distance_km.is_absent()
            && self.amount_paid.is_absent()
            && self.actual_duration.is_none()
            && self.expenses.is_absent()
            && self.toll_tax.is_absent()
    }

    pub fn into_draft(self) -> AppResult<BookingDraft> {
        if self.is_empty() {
            return Err(AppError::NoFieldsToInsert);
        }
        let tour_id = self
            .tour_id
            .ok_or_else(|| validation_error("tour_id", "A booking is created from a tour"))?;

        Ok(BookingDraft {
            tour_id,
            company_id: self.company_id,
            lead_id: self.lead_id,
            vehicle_id: self.vehicle_id,
            actual_distance_km: required_amount("actual_distance_km", &self.actual_distance_km, true)?,
            amount_paid: required_amount("amount_paid", &self.amount_paid, true)?,
            actual_duration: self.actual_duration,
            expenses: required_amount("expenses", &self.expenses, true)?,
            toll_tax: required_amount("toll_tax", &self.toll_tax, true)?,
        })
    }
}
