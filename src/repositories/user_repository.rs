use sqlx::PgPool;

use crate::models::user::{User, UserResponse};
use crate::repositories::UpdateBuilder;
use crate::utils::errors::{map_unique_violation, AppError};
use crate::utils::field::Field;

const DUPLICATE_USER: &str = "User with this email or mobile already exists";

const USER_COLUMNS: &str =
    "id, username, email, role, mobile, is_active, last_login, created_at, updated_at";

/// Column values of a user insert; `password` is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub mobile: Option<String>,
}

/// Present fields of a user update; `password` is already hashed
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub mobile: Field<String>,
    pub is_active: Option<bool>,
}

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn email_or_mobile_exists(
        &self,
        email: &str,
        mobile: Option<&str>,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR ($2::TEXT IS NOT NULL AND mobile = $2))",
        )
        .bind(email)
        .bind(mobile)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, user: NewUser) -> Result<UserResponse, AppError> {
        let query = format!(
            r#"
            INSERT INTO users (username, email, password, role, mobile)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let created = sqlx::query_as::<_, UserResponse>(&query)
            .bind(user.username)
            .bind(user.email.to_lowercase())
            .bind(user.password)
            .bind(user.role)
            .bind(user.mobile)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, DUPLICATE_USER))?;

        Ok(created)
    }

    /// Active user by email, password hash included
    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let result = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = TRUE",
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserResponse>, AppError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let result = sqlx::query_as::<_, UserResponse>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<UserResponse>, AppError> {
        let query = format!("SELECT {} FROM users ORDER BY id DESC", USER_COLUMNS);
        let result = sqlx::query_as::<_, UserResponse>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_page(&self, limit: i64, offset: i64) -> Result<Vec<UserResponse>, AppError> {
        let query = format!(
            "SELECT {} FROM users ORDER BY id DESC LIMIT $1 OFFSET $2",
            USER_COLUMNS
        );
        let result = sqlx::query_as::<_, UserResponse>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update_last_login(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update(&self, id: i64, changes: UserChanges) -> Result<bool, AppError> {
        let mut update = UpdateBuilder::new("users");
        update
            .set_opt("username", changes.username)
            .set_opt("email", changes.email.map(|email| email.to_lowercase()))
            .set_opt("password", changes.password)
            .set_opt("role", changes.role)
            .set_field("mobile", changes.mobile)
            .set_opt("is_active", changes.is_active);

        if update.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }
        update.set_raw("updated_at = NOW()");

        let result = update
            .where_id(id)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, DUPLICATE_USER))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
