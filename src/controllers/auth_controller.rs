use sqlx::PgPool;
use validator::Validate;

use crate::config::EnvironmentConfig;
use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, LoginRequest, LoginResponse};
use crate::models::user::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::services::auth_service::AuthService;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::jwt::JwtConfig;

pub const AUTH_COOKIE: &str = "authToken";

/// `Set-Cookie` value carrying the session token
pub fn auth_cookie(token: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/api; Max-Age={}",
        AUTH_COOKIE, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value expiring the session cookie
pub fn clear_auth_cookie(secure: bool) -> String {
    auth_cookie("", 0, secure)
}

pub struct AuthController {
    service: AuthService,
    users: UserRepository,
}

impl AuthController {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            service: AuthService::new(pool.clone(), JwtConfig::from(config)),
            users: UserRepository::new(pool),
        }
    }

    pub async fn register(
        &self,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;
        let user = self.service.register(request).await?;

        Ok(ApiResponse::success_with_message(
            user,
            "User registered successfully",
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;
        self.service.login(request).await
    }

    pub async fn me(&self, user_id: i64) -> Result<UserResponse, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| not_found_error("User", user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie_attributes() {
        let cookie = auth_cookie("abc", 900, false);
        assert_eq!(
            cookie,
            "authToken=abc; HttpOnly; SameSite=Strict; Path=/api; Max-Age=900"
        );
        assert!(auth_cookie("abc", 900, true).ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(clear_auth_cookie(false).starts_with("authToken=; "));
        assert!(clear_auth_cookie(false).contains("Max-Age=0"));
    }
}
