//! Tour request bodies
//!
//! `distance_km` and `premium` arrive as raw JSON so a bad amount is an
//! `InvalidAmount` error, as for bookings.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::services::pricing_service::TourPricingPatch;
use crate::utils::errors::AppResult;
use crate::utils::field::Field;
use crate::utils::money::Money;

// Request to create a tour; price and total are derived
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateTourRequest {
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    #[serde(default)]
    pub vehicle_id: Field<i64>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub start_state: Option<String>,
    pub end_state: Option<String>,
    pub start_city: Option<String>,
    pub end_city: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub duration_days: Option<i32>,
    #[serde(default)]
    pub distance_km: Field<Value>,
    #[validate(length(min = 1, max = 50))]
    pub type_of_tour: Option<String>,
    #[serde(default)]
    pub premium: Field<Value>,
}

impl CreateTourRequest {
    /// Pricing inputs with the amounts parsed; a `null` amount is left unset
    pub fn pricing(&self) -> AppResult<TourPricingPatch> {
        Ok(TourPricingPatch {
            company_id: self.company_id.into(),
            type_of_tour: self.type_of_tour.clone().into(),
            distance_km: unset_if_null(Money::parse_field("distance_km", self.distance_km.clone(), true)?),
            premium: unset_if_null(Money::parse_field("premium", self.premium.clone(), true)?),
        })
    }
}

fn unset_if_null(amount: Field<Money>) -> Field<Money> {
    match amount {
        Field::Null => Field::Absent,
        other => other,
    }
}

// Request to update a tour; `driver_id` follows the vehicle
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTourRequest {
    #[serde(default)]
    pub company_id: Field<i64>,
    #[serde(default)]
    pub lead_id: Field<i64>,
    #[serde(default)]
    pub vehicle_id: Field<i64>,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub start_state: Field<String>,
    #[serde(default)]
    pub end_state: Field<String>,
    #[serde(default)]
    pub start_city: Field<String>,
    #[serde(default)]
    pub end_city: Field<String>,
    #[serde(default)]
    pub pickup_location: Field<String>,
    #[serde(default)]
    pub drop_location: Field<String>,
    #[serde(default)]
    pub start_date: Field<NaiveDate>,
    #[serde(default)]
    pub end_date: Field<NaiveDate>,
    #[serde(default)]
    pub duration_days: Field<i32>,
    #[serde(default)]
    pub distance_km: Field<Value>,
    #[serde(default)]
    pub type_of_tour: Field<String>,
    #[serde(default)]
    pub premium: Field<Value>,
}

impl UpdateTourRequest {
    /// Pricing inputs with the amounts parsed; `null` clears an amount
    pub fn pricing(&self) -> AppResult<TourPricingPatch> {
        Ok(TourPricingPatch {
            company_id: self.company_id.clone(),
            type_of_tour: self.type_of_tour.clone(),
            distance_km: Money::parse_field("distance_km", self.distance_km.clone(), true)?,
            premium: Money::parse_field("premium", self.premium.clone(), true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use serde_json::json;

    #[test]
    fn test_pricing_inputs_from_create() {
        let request: CreateTourRequest = serde_json::from_value(json!({
            "company_id": 1,
            "type_of_tour": "Local",
            "distance_km": 50,
            "premium": "200"
        }))
        .unwrap();

        let pricing = request.pricing().unwrap();
        assert_eq!(pricing.company_id, Field::Value(1));
        assert_eq!(pricing.distance_km, Field::Value(Money::from(50)));
        assert_eq!(pricing.premium, Field::Value(Money::from(200)));
    }

    #[test]
    fn test_negative_distance_rejected() {
        let request: UpdateTourRequest =
            serde_json::from_value(json!({ "distance_km": -3 })).unwrap();
        assert!(matches!(request.pricing(), Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn test_non_numeric_amounts_are_invalid_amounts() {
        let request: CreateTourRequest =
            serde_json::from_value(json!({ "company_id": 1, "distance_km": "far" })).unwrap();
        assert!(matches!(request.pricing(), Err(AppError::InvalidAmount(_))));

        let request: UpdateTourRequest =
            serde_json::from_value(json!({ "premium": { "amount": 10 } })).unwrap();
        assert!(matches!(request.pricing(), Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn test_null_amounts() {
        let request: CreateTourRequest =
            serde_json::from_value(json!({ "distance_km": null, "premium": 150 })).unwrap();
        let pricing = request.pricing().unwrap();
        assert_eq!(pricing.distance_km, Field::Absent);
        assert_eq!(pricing.premium, Field::Value(Money::from(150)));

        let request: UpdateTourRequest = serde_json::from_value(json!({ "premium": null })).unwrap();
        assert_eq!(request.pricing().unwrap().premium, Field::Null);
    }
}
