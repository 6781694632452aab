use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::lead_dto::{CreateLeadRequest, UpdateLeadRequest};
use crate::models::lead::{Lead, LeadPick};
use crate::repositories::lead_repository::LeadRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};

pub struct LeadController {
    repository: LeadRepository,
}

impl LeadController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: LeadRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateLeadRequest,
    ) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;

        if self.repository.phone_exists(&request.phone, None).await? {
            return Err(conflict_error("Lead", "phone", &request.phone));
        }

        let id = self.repository.create(request).await?;

        Ok(ApiResponse::success_with_message(
            CreatedResponse { id },
            "Lead created successfully",
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Lead, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Lead", id))
    }

    pub async fn list(&self) -> Result<Vec<Lead>, AppError> {
        self.repository.list_all().await
    }

    pub async fn picklist(&self) -> Result<Vec<LeadPick>, AppError> {
        self.repository.picklist().await
    }

    pub async fn update(&self, id: i64, request: UpdateLeadRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        if let Some(phone) = request.phone.as_deref() {
            if self.repository.phone_exists(phone, Some(id)).await? {
                return Err(conflict_error("Lead", "phone", phone));
            }
        }

        if !self.repository.update(id, request).await? {
            return Err(not_found_error("Lead", id));
        }

        Ok(ApiResponse::message("Lead updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Lead", id));
        }
        Ok(())
    }
}
