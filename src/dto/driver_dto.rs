use serde::Deserialize;
use validator::Validate;

use crate::utils::field::Field;
use crate::utils::validation::{validate_not_empty, validate_phone};

// Request to create a driver
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub name: String,
    pub license_number: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    pub aadhar_card: Option<String>,
    pub status: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub company_id: Option<i64>,
}

// Request to update a driver
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    pub license_number: Field<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[serde(default)]
    pub aadhar_card: Field<String>,
    #[serde(default)]
    pub status: Field<String>,
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub company_id: Field<i64>,
}
