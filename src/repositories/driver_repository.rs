use sqlx::PgPool;

use crate::dto::driver_dto::{CreateDriverRequest, UpdateDriverRequest};
use crate::models::driver::{Driver, DriverPick};
use crate::repositories::UpdateBuilder;
use crate::utils::errors::{map_unique_violation, AppError};

const DUPLICATE_PHONE: &str = "Driver with this phone already exists";

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn phone_exists(&self, phone: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM drivers WHERE phone = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(phone)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, request: CreateDriverRequest) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO drivers (name, license_number, phone, aadhar_card, status, email, company_id)
            VALUES ($1, $2, $3, $4, COALESCE($5, 'Available'), $6, $7)
            RETURNING id
            "#,
        )
        .bind(request.name.trim())
        .bind(request.license_number)
        .bind(request.phone)
        .bind(request.aadhar_card)
        .bind(request.status)
        .bind(request.email)
        .bind(request.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_PHONE))?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<Driver>, AppError> {
        let result = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn picklist(&self) -> Result<Vec<DriverPick>, AppError> {
        let result =
            sqlx::query_as::<_, DriverPick>("SELECT id, name, status FROM drivers ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(result)
    }

    pub async fn update(&self, id: i64, request: UpdateDriverRequest) -> Result<bool, AppError> {
        let mut update = UpdateBuilder::new("drivers");
        update
            .set_opt("name", request.name.map(|name| name.trim().to_string()))
            .set_field("license_number", request.license_number)
            .set_opt("phone", request.phone)
            .set_field("aadhar_card", request.aadhar_card)
            .set_field("status", request.status)
            .set_field("email", request.email)
            .set_field("company_id", request.company_id);

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
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
