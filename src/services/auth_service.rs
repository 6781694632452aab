//! Authentication service
//!
//! Registers back-office users with a bcrypt hash and issues JWTs on login.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::dto::user_dto::{CreateUserRequest, LoginRequest, LoginResponse};
use crate::models::user::{UserResponse, DEFAULT_ROLE};
use crate::repositories::user_repository::{NewUser, UserRepository};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hashes on the blocking pool
pub async fn hash_password(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

pub async fn verify_password(password: String, hashed: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

pub struct AuthService {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt,
        }
    }

    pub async fn register(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        if self
            .users
            .email_or_mobile_exists(&request.email, request.mobile.as_deref())
            .await?
        {
            return Err(AppError::Conflict(
                "User with this email or mobile already exists".to_string(),
            ));
        }

        let password = hash_password(request.password).await?;
        let user = self
            .users
            .create(NewUser {
                username: request.username.trim().to_string(),
                email: request.email,
                password,
                role: request.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
                mobile: request.mobile,
            })
            .await?;

        info!(user_id = user.id, "User registered");
        Ok(user)
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let user = match self.users.find_active_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                warn!(email = %request.email, "Login attempt for unknown or inactive user");
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(request.password, user.password.clone()).await? {
            warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = generate_token(user.id, &user.email, &user.role, &self.jwt)?;
        self.users.update_last_login(user.id).await?;

        info!(user_id = user.id, "User logged in");
        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: UserResponse::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_password_hash_verifies() {
        let hashed = hash_password("s3cret-pass".to_string()).await.unwrap();
        assert_ne!(hashed, "s3cret-pass");
        assert!(verify_password("s3cret-pass".to_string(), hashed.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong".to_string(), hashed).await.unwrap());
    }
}
