use sqlx::PgPool;

use crate::dto::lead_dto::{CreateLeadRequest, UpdateLeadRequest};
use crate::models::lead::{Lead, LeadPick};
use crate::repositories::UpdateBuilder;
use crate::utils::errors::{map_unique_violation, AppError};

const DUPLICATE_PHONE: &str = "Lead with this phone already exists";

pub struct LeadRepository {
    pool: PgPool,
}

impl LeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn phone_exists(&self, phone: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM leads WHERE phone = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(phone)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, request: CreateLeadRequest) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO leads (name, phone, email, source, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(request.name.trim())
        .bind(request.phone)
        .bind(request.email)
        .bind(request.source)
        .bind(request.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_PHONE))?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Lead>, AppError> {
        let result = sqlx::query_as::<_, Lead>("SELECT * FROM leads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<Lead>, AppError> {
        let result = sqlx::query_as::<_, Lead>("SELECT * FROM leads ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn picklist(&self) -> Result<Vec<LeadPick>, AppError> {
        let result = sqlx::query_as::<_, LeadPick>("SELECT id, name FROM leads ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn update(&self, id: i64, request: UpdateLeadRequest) -> Result<bool, AppError> {
        let mut update = UpdateBuilder::new("leads");
        update
            .set_opt("name", request.name.map(|name| name.trim().to_string()))
            .set_opt("phone", request.phone)
            .set_field("email", request.email)
            .set_field("source", request.source)
            .set_field("status", request.status);

        if update.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }

        let result = update
            .where_id(id)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, DUPLICATE_PHONE))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM leads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
