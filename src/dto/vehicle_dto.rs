use serde::Deserialize;
use validator::Validate;

use crate::utils::field::Field;
use crate::utils::validation::validate_registration_number;

// Request to create a vehicle
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    pub company_id: Option<i64>,
    #[validate(custom = "validate_registration_number")]
    pub registration_number: String,
    #[validate(length(max = 100))]
    pub make: Option<String>,
    pub owner_driver_id: Option<i64>,
    pub assigned_driver_id: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub capacity: Option<i32>,
    pub available_status: Option<String>,
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub company: Option<String>,
}

// Request to update a vehicle
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[serde(default)]
    pub company_id: Field<i64>,
    #[validate(custom = "validate_registration_number")]
    pub registration_number: Option<String>,
    #[serde(default)]
    pub make: Field<String>,
    #[serde(default)]
    pub owner_driver_id: Field<i64>,
    #[serde(default)]
    pub assigned_driver_id: Field<i64>,
    #[serde(default)]
    pub capacity: Field<i32>,
    #[serde(default)]
    pub available_status: Field<String>,
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub company: Field<String>,
}
