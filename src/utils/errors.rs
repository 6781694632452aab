//! Error handling
//!
//! Defines every application error and its mapping to an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No valid fields provided for update")]
    NoFieldsToUpdate,

    #[error("No fields to insert")]
    NoFieldsToInsert,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Vehicle lookup failed: {0}")]
    VehicleLookupFailed(String),

    #[error("Dependency lookup failed: {0}")]
    DependencyLookup(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_)
            | AppError::Internal(_)
            | AppError::Hash(_)
            | AppError::VehicleLookupFailed(_)
            | AppError::DependencyLookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_)
            | AppError::InvalidAmount(_)
            | AppError::NoFieldsToUpdate
            | AppError::NoFieldsToInsert => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::TokenExpired | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = match self {
            AppError::Database(e) => ErrorResponse::new(
                "Database Error",
                "An error occurred while accessing the database".to_string(),
                "DB_ERROR",
            )
            .with_details(json!({ "sql_error": e.to_string() })),

            AppError::Validation(e) => ErrorResponse::new(
                "Validation Error",
                "The provided data is invalid".to_string(),
                "VALIDATION_ERROR",
            )
            .with_details(json!(e)),

            AppError::InvalidAmount(msg) => {
                ErrorResponse::new("Validation Error", msg, "INVALID_AMOUNT")
            }

            AppError::NoFieldsToUpdate => ErrorResponse::new(
                "Validation Error",
                "No valid fields provided for update".to_string(),
                "NO_FIELDS_TO_UPDATE",
            ),

            AppError::NoFieldsToInsert => ErrorResponse::new(
                "Validation Error",
                "No fields to insert".to_string(),
                "NO_FIELDS_TO_INSERT",
            ),

            AppError::Unauthorized(msg) => ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED"),

            AppError::TokenExpired => {
                ErrorResponse::new("Unauthorized", "Token expired".to_string(), "TOKEN_EXPIRED")
            }

            AppError::Forbidden(msg) => ErrorResponse::new("Forbidden", msg, "FORBIDDEN"),

            AppError::NotFound(msg) => ErrorResponse::new("Not Found", msg, "NOT_FOUND"),

            AppError::Conflict(msg) => ErrorResponse::new("Conflict", msg, "CONFLICT"),

            AppError::VehicleLookupFailed(msg) => ErrorResponse::new(
                "Dependency Lookup Error",
                "Error fetching driver details".to_string(),
                "VEHICLE_LOOKUP_FAILED",
            )
            .with_details(json!({ "lookup_error": msg })),

            AppError::DependencyLookup(msg) => ErrorResponse::new(
                "Dependency Lookup Error",
                "Error fetching related records".to_string(),
                "DEPENDENCY_LOOKUP_FAILED",
            )
            .with_details(json!({ "lookup_error": msg })),

            AppError::Internal(msg) => ErrorResponse::new(
                "Internal Server Error",
                "An unexpected error occurred".to_string(),
                "INTERNAL_ERROR",
            )
            .with_details(json!({ "internal_error": msg })),

            AppError::RateLimitExceeded => ErrorResponse::new(
                "Rate Limit Exceeded",
                "Too many attempts. Please try again later.".to_string(),
                "RATE_LIMIT_EXCEEDED",
            ),

            AppError::ServiceUnavailable(msg) => {
                ErrorResponse::new("Service Unavailable", msg, "SERVICE_UNAVAILABLE")
            }

            AppError::Jwt(msg) => ErrorResponse::new("JWT Error", msg, "JWT_ERROR"),

            AppError::Hash(msg) => ErrorResponse::new(
                "Hash Error",
                "An error occurred while processing credentials".to_string(),
                "HASH_ERROR",
            )
            .with_details(json!({ "hash_error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

/// Result alias for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Builds a validator-style error for a single field
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.add_param("field".into(), &field);
    error.add_param("message".into(), &message);

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Maps a unique-constraint violation to `Conflict`, anything else to `Database`
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(message.to_string())
        }
        _ => AppError::Database(err),
    }
}
