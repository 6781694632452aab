use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::driver::{Driver, DriverPick};
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;

        if self.repository.phone_exists(&request.phone, None).await? {
            return Err(conflict_error("Driver", "phone", &request.phone));
        }

        let id = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            CreatedResponse { id },
            "Driver created successfully",
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Driver", id))
    }

    pub async fn list(&self) -> Result<Vec<Driver>, AppError> {
        self.repository.list_all().await
    }

    pub async fn picklist(&self) -> Result<Vec<DriverPick>, AppError> {
        self.repository.picklist().await
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        if let Some(phone) = request.phone.as_deref() {
            if self.repository.phone_exists(phone, Some(id)).await? {
                return Err(conflict_error("Driver", "phone", phone));
            }
        }

        if !self.repository.update(id, request).await? {
            return Err(not_found_error("Driver", id));
        }

        Ok(ApiResponse::message("Driver updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Driver", id));
        }
        Ok(())
    }
}
