use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::{Vehicle, VehiclePick};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use crate::utils::validation::normalize_registration_number;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;

        let registration = normalize_registration_number(&request.registration_number);
        if self.repository.registration_exists(&registration, None).await? {
            return Err(conflict_error("Vehicle", "registration number", &registration));
        }

        let id = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            CreatedResponse { id },
            "Vehicle created successfully",
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list_all().await
    }

    pub async fn picklist(&self) -> Result<Vec<VehiclePick>, AppError> {
        self.repository.picklist().await
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        if let Some(registration) = request.registration_number.as_deref() {
            let registration = normalize_registration_number(registration);
            if self
                .repository
                .registration_exists(&registration, Some(id))
                .await?
            {
                return Err(conflict_error("Vehicle", "registration number", &registration));
            }
        }

        if !self.repository.update(id, request).await? {
            return Err(not_found_error("Vehicle", id));
        }

        Ok(ApiResponse::message("Vehicle updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}
