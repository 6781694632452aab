use sqlx::PgPool;
use validator::Validate;

use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::company_dto::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::models::company::{Company, CompanyPick};
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct CompanyController {
    repository: CompanyRepository,
}

impl CompanyController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CompanyRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateCompanyRequest,
    ) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;
        let id = self.repository.create(request.into_new_company()?).await?;

        Ok(ApiResponse::success_with_message(
            CreatedResponse { id },
            "Company created successfully",
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Company, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", id))
    }

    pub async fn list(&self) -> Result<Vec<Company>, AppError> {
        self.repository.list_all().await
    }

    pub async fn picklist(&self) -> Result<Vec<CompanyPick>, AppError> {
        self.repository.picklist().await
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateCompanyRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        if !self.repository.update(id, request.into_changes()?).await? {
            return Err(not_found_error("Company", id));
        }

        Ok(ApiResponse::message("Company updated successfully"))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Company", id));
        }
        Ok(())
    }
}
