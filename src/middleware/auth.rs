//! JWT authentication middleware
//!
//! Reads the token from `Authorization: Bearer` or the `authToken` cookie and
//! injects the authenticated user into the request extensions.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::controllers::auth_controller::AUTH_COOKIE;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_cookie, extract_token_from_header, verify_token, JwtConfig};

/// User behind a verified token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: String,
}

/// Bearer header first, then the session cookie
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_token_from_header);

    bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|cookies| extract_cookie(cookies, AUTH_COOKIE))
    })
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = token_from_headers(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let claims = verify_token(token, &JwtConfig::from(state.config.as_ref())).map_err(|e| {
        warn!(path = %request.uri().path(), error = %e, "Rejected token");
        e
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: claims.id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
