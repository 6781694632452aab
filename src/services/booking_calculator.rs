//! Booking financial recalculation
//!
//! Turns a prior booking snapshot and a partial update into the full set of
//! columns to persist, keeping the derived amounts consistent:
//!
//! - `actual_total_amount` is `total_amount`, plus `extra km * rate` when the
//!   actual distance exceeds the booked distance and a rate is known
//! - `outstanding_amount = actual_total_amount - amount_paid`
//! - `profit = actual_total_amount - (expenses + toll_tax)`
//!
//! The recalculation is pure. Lookups (the new vehicle's driver) are done by
//! the caller beforehand; the only failure is an amount that leaves the
//! decimal range, reported as `InvalidAmount`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::booking::BookingSnapshot;
use crate::services::pricing_service::rate_for;
use crate::utils::errors::AppResult;
use crate::utils::field::Field;
use crate::utils::money::Money;

/// Typed partial update of a booking
///
/// Amounts are always values: a `null` amount is rejected while parsing.
/// `driver_id` and `type_of_tour` have no slot here, they are never
/// client-settable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingPatch {
    pub vehicle_id: Field<i64>,
    pub actual_distance_km: Option<Money>,
    pub amount_paid: Option<Money>,
    pub expenses: Option<Money>,
    pub toll_tax: Option<Money>,
    pub company_id: Field<i64>,
    pub lead_id: Field<i64>,
    pub tour_id: Field<i64>,
    pub booking_date: Field<NaiveDate>,
    pub booking_end_date: Field<NaiveDate>,
    pub booked_distance_km: Field<Money>,
    pub total_amount: Field<Money>,
    pub status: Field<String>,
}

impl BookingPatch {
    /// True when the update carries no recognized field
    pub fn is_empty(&self) -> bool {
        self.vehicle_id.is_absent()
            && self.actual_distance_km.is_none()
            && self.amount_paid.is_none()
            && self.expenses.is_none()
            && self.toll_tax.is_none()
            && self.company_id.is_absent()
            && self.lead_id.is_absent()
            && self.tour_id.is_absent()
            && self.booking_date.is_absent()
            && self.booking_end_date.is_absent()
            && self.booked_distance_km.is_absent()
            && self.total_amount.is_absent()
            && self.status.is_absent()
    }
}

/// Columns written by one booking update
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingChanges {
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub vehicle_id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub driver_id: Field<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_distance_km: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_total_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outstanding_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expenses: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toll_tax: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<Money>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub company_id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub lead_id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub tour_id: Field<i64>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub booking_date: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub booking_end_date: Field<NaiveDate>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub booked_distance_km: Field<Money>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub total_amount: Field<Money>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub status: Field<String>,
}

/// Computes the columns to persist for `patch` applied over `prior`
///
/// `assigned_driver` is the current driver of the vehicle named in the
/// patch; it is only read when the patch carries `vehicle_id`.
///
/// Distances and totals are compared against the prior baseline
/// (`total_amount`, `booked_distance_km`) even if the same patch rewrites
/// them. Empty prior amounts count as zero.
pub fn recalculate(
    prior: &BookingSnapshot,
    patch: &BookingPatch,
    assigned_driver: Option<i64>,
) -> AppResult<BookingChanges> {
    let mut changes = BookingChanges::default();

    let rate = rate_for(&prior.rates(), &prior.tour_type());
    let baseline = Money::or_zero(prior.total_amount);
    let booked = Money::or_zero(prior.booked_distance_km);

    let paid = patch.amount_paid.or(prior.amount_paid).unwrap_or(Money::ZERO);
    let expenses = patch.expenses.or(prior.expenses).unwrap_or(Money::ZERO);
    let toll_tax = patch.toll_tax.or(prior.toll_tax).unwrap_or(Money::ZERO);

    let actual_total = match patch.actual_distance_km {
        Some(distance) => {
            let actual_total = match rate {
                Some(rate) if distance.is_greater_than(booked) => {
                    baseline.plus(distance.minus(booked)?.scaled_by(rate)?)?
                }
                // Equal or shorter trips, and unknown rates, fall back to the baseline
                _ => baseline,
            };

            changes.actual_distance_km = Some(distance);
            changes.actual_total_amount = Some(actual_total);
            changes.outstanding_amount = Some(actual_total.minus(paid)?);
            changes.profit = Some(profit(actual_total, expenses, toll_tax)?);
            actual_total
        }
        None => Money::or_zero(prior.actual_total_amount),
    };

    if let Some(amount_paid) = patch.amount_paid {
        changes.amount_paid = Some(amount_paid);
        changes.outstanding_amount = Some(actual_total.minus(amount_paid)?);
    }

    if patch.expenses.is_some() || patch.toll_tax.is_some() {
        changes.expenses = patch.expenses;
        changes.toll_tax = patch.toll_tax;
        changes.profit = Some(profit(actual_total, expenses, toll_tax)?);
    }

    if patch.vehicle_id.is_present() {
        changes.vehicle_id = patch.vehicle_id.clone();
        changes.driver_id = match patch.vehicle_id {
            Field::Value(_) => Field::from(assigned_driver),
            _ => Field::Null,
        };
    }

    changes.company_id = patch.company_id.clone();
    changes.lead_id = patch.lead_id.clone();
    changes.tour_id = patch.tour_id.clone();
    changes.booking_date = patch.booking_date.clone();
    changes.booking_end_date = patch.booking_end_date.clone();
    changes.booked_distance_km = patch.booked_distance_km.clone();
    changes.total_amount = patch.total_amount.clone();
    changes.status = patch.status.clone();

    Ok(changes)
}

/// `actual_total - (expenses + toll_tax)`
pub fn profit(actual_total: Money, expenses: Money, toll_tax: Money) -> AppResult<Money> {
    actual_total.minus(expenses.plus(toll_tax)?)
}
