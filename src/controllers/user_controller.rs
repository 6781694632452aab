use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, PageQuery, UpdateUserRequest};
use crate::models::user::{UserPage, UserResponse, DEFAULT_ROLE};
use crate::repositories::user_repository::{NewUser, UserChanges, UserRepository};
use crate::services::auth_service::hash_password;
use crate::utils::errors::{not_found_error, AppError};

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        if self
            .repository
            .email_or_mobile_exists(&request.email, request.mobile.as_deref())
            .await?
        {
            return Err(AppError::Conflict(
                "User with this email or mobile already exists".to_string(),
            ));
        }

        let password = hash_password(request.password).await?;
        let user = self
            .repository
            .create(NewUser {
                username: request.username.trim().to_string(),
                email: request.email,
                password,
                role: request.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
                mobile: request.mobile,
            })
            .await?;

        Ok(ApiResponse::success_with_message(user, "User created successfully"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<UserResponse, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        self.repository.list_all().await
    }

    pub async fn page(&self, query: PageQuery) -> Result<UserPage, AppError> {
        let (page, limit) = query.resolve();
        let data = self.repository.list_page(limit, query.offset()).await?;

        Ok(UserPage { page, limit, data })
    }

    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        let password = match request.password {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        let changes = UserChanges {
            username: request.username.map(|name| name.trim().to_string()),
            email: request.email,
            password,
            role: request.role,
            mobile: request.mobile,
            is_active: request.is_active,
        };

        if !self.repository.update(id, changes).await? {
            return Err(not_found_error("User", id));
        }

        Ok(ApiResponse::message("User updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("User", id));
        }
        Ok(())
    }
}
