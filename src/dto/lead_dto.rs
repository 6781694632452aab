use serde::Deserialize;
use validator::Validate;

use crate::utils::field::Field;
use crate::utils::validation::{validate_not_empty, validate_phone};

// Request to create a lead
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub name: String,
    #[validate(custom = "validate_phone")]
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
}

// Request to update a lead
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLeadRequest {
    #[validate(custom = "validate_not_empty", length(max = 100))]
    pub name: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub source: Field<String>,
    #[serde(default)]
    pub status: Field<String>,
}
