use sqlx::PgPool;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::{Vehicle, VehiclePick};
use crate::repositories::UpdateBuilder;
use crate::utils::errors::{map_unique_violation, AppError};
use crate::utils::validation::normalize_registration_number;

const DUPLICATE_REGISTRATION: &str = "Vehicle with this registration number already exists";

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn registration_exists(
        &self,
        registration_number: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM vehicles
                WHERE registration_number = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(registration_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO vehicles (
                company_id, registration_number, make, name, company, capacity,
                owner_driver_id, assigned_driver_id, available_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'Available'))
            RETURNING id
            "#,
        )
        .bind(request.company_id)
        .bind(normalize_registration_number(&request.registration_number))
        .bind(request.make)
        .bind(request.name)
        .bind(request.company)
        .bind(request.capacity)
        .bind(request.owner_driver_id)
        .bind(request.assigned_driver_id)
        .bind(request.available_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, DUPLICATE_REGISTRATION))?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let result = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(result)
    }

    /// Vehicles with their assigned and owner drivers
    pub async fn picklist(&self) -> Result<Vec<VehiclePick>, AppError> {
        let result = sqlx::query_as::<_, VehiclePick>(
            r#"
            SELECT v.id, v.name, v.company, v.available_status, v.assigned_driver_id,
                   ad.name AS driver_name, ad.email AS driver_email,
                   ad.status AS driver_status, ad.phone AS driver_phone,
                   v.owner_driver_id,
                   od.name AS owner_name, od.email AS owner_email,
                   od.status AS owner_status, od.phone AS owner_phone
            FROM vehicles v
            LEFT JOIN drivers ad ON v.assigned_driver_id = ad.id
            LEFT JOIN drivers od ON v.owner_driver_id = od.id
            ORDER BY v.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(&self, id: i64, request: UpdateVehicleRequest) -> Result<bool, AppError> {
        let mut update = UpdateBuilder::new("vehicles");
        update
            .set_field("company_id", request.company_id)
            .set_opt(
                "registration_number",
                request
                    .registration_number
                    .as_deref()
                    .map(normalize_registration_number),
            )
            .set_field("make", request.make)
            .set_field("owner_driver_id", request.owner_driver_id)
            .set_field("assigned_driver_id", request.assigned_driver_id)
            .set_field("capacity", request.capacity)
            .set_field("available_status", request.available_status)
            .set_field("name", request.name)
            .set_field("company", request.company);

        if update.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }

        let result = update
            .where_id(id)
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, DUPLICATE_REGISTRATION))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
