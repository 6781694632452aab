//! Validation helpers
//!
//! Field-level checks shared by the controllers, in the same
//! `validator::ValidationError` shape that the derive macros produce.

use validator::ValidationError;

pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Basic phone check: 10 to 15 digits once separators are stripped
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(10..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Registration plates such as `MH 12 AB 1234` or `KA-01-HH-1234`
pub fn validate_registration_number(value: &str) -> Result<(), ValidationError> {
    let clean = value.replace([' ', '-', '_'], "");
    if clean.len() < 5 || clean.len() > 12 || !clean.chars().all(|c| c.is_ascii_alphanumeric()) {
        let mut error = ValidationError::new("registration_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Uppercase without separators, used for duplicate detection
pub fn normalize_registration_number(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
