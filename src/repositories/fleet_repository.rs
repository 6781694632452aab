//! Vehicle/driver availability access used by the booking core

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::driver::DriverStatus;
use crate::models::vehicle::VehicleAvailability;
use crate::utils::errors::AppResult;

/// Fleet rows touched by booking updates
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// Assigned driver of a vehicle; `None` when the vehicle does not exist
    /// or has no driver
    async fn assigned_driver(&self, vehicle_id: i64) -> AppResult<Option<i64>>;

    /// Returns whether a row was updated
    async fn set_vehicle_availability(
        &self,
        vehicle_id: i64,
        status: &VehicleAvailability,
    ) -> AppResult<bool>;

    /// Returns whether a row was updated
    async fn set_driver_status(&self, driver_id: i64, status: &DriverStatus) -> AppResult<bool>;
}

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FleetStore for FleetRepository {
    async fn assigned_driver(&self, vehicle_id: i64) -> AppResult<Option<i64>> {
        let row: Option<(Option<i64>,)> =
            sqlx::query_as("SELECT assigned_driver_id FROM vehicles WHERE id = $1")
                .bind(vehicle_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.and_then(|(driver_id,)| driver_id))
    }

    async fn set_vehicle_availability(
        &self,
        vehicle_id: i64,
        status: &VehicleAvailability,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE vehicles SET available_status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_driver_status(&self, driver_id: i64, status: &DriverStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE drivers SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(driver_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
