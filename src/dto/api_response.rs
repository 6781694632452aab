use axum::{http::StatusCode, Json};
use serde::Serialize;

// Response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Envelope sent back with `201 Created`
    pub fn into_created(self) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Json(self))
    }

    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

// Id of a newly created row
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_created_envelope_is_201() {
        let response = ApiResponse::success(CreatedResponse { id: 42 })
            .into_created()
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
