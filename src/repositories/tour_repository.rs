use sqlx::PgPool;

use crate::models::tour::{TourDetail, TourPricingInputs, TourSummary};
use crate::repositories::UpdateBuilder;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::field::Field;
use crate::utils::money::Money;

/// Column values of a tour insert, pricing already resolved
#[derive(Debug, Clone, Default)]
pub struct NewTour {
    pub company_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub type_of_tour: Option<String>,
    pub description: Option<String>,
    pub start_state: Option<String>,
    pub end_state: Option<String>,
    pub start_city: Option<String>,
    pub end_city: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    pub duration_days: Option<i32>,
    pub distance_km: Option<Money>,
    pub premium: Option<Money>,
    pub price: Money,
    pub total_amount: Option<Money>,
}

/// Present fields of a tour update, derived columns included
#[derive(Debug, Clone, Default)]
pub struct TourChanges {
    pub company_id: Field<i64>,
    pub lead_id: Field<i64>,
    pub vehicle_id: Field<i64>,
    pub driver_id: Field<i64>,
    pub type_of_tour: Field<String>,
    pub description: Field<String>,
    pub start_state: Field<String>,
    pub end_state: Field<String>,
    pub start_city: Field<String>,
    pub end_city: Field<String>,
    pub pickup_location: Field<String>,
    pub drop_location: Field<String>,
    pub start_date: Field<chrono::NaiveDate>,
    pub end_date: Field<chrono::NaiveDate>,
    pub duration_days: Field<i32>,
    pub distance_km: Field<Money>,
    pub premium: Field<Money>,
    pub price: Option<Money>,
    pub total_amount: Field<Money>,
}

pub fn tour_label(id: i64) -> String {
    format!("T NO -{:04}", id)
}

pub struct TourRepository {
    pool: PgPool,
}

impl TourRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the tour and labels it from its id
    pub async fn create(&self, tour: NewTour) -> AppResult<(i64, String)> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO tours (
                company_id, lead_id, vehicle_id, driver_id, type_of_tour, description,
                start_state, end_state, start_city, end_city, pickup_location,
                drop_location, start_date, end_date, duration_days, distance_km,
                premium, price, total_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING id
            "#,
        )
        .bind(tour.company_id)
        .bind(tour.lead_id)
        .bind(tour.vehicle_id)
        .bind(tour.driver_id)
        .bind(tour.type_of_tour)
        .bind(tour.description)
        .bind(tour.start_state)
        .bind(tour.end_state)
        .bind(tour.start_city)
        .bind(tour.end_city)
        .bind(tour.pickup_location)
        .bind(tour.drop_location)
        .bind(tour.start_date)
        .bind(tour.end_date)
        .bind(tour.duration_days)
        .bind(tour.distance_km)
        .bind(tour.premium)
        .bind(tour.price)
        .bind(tour.total_amount)
        .fetch_one(&self.pool)
        .await?;

        let name = tour_label(id);
        sqlx::query("UPDATE tours SET name = $1 WHERE id = $2")
            .bind(&name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok((id, name))
    }

    pub async fn list_all(&self) -> AppResult<Vec<TourSummary>> {
        let result = sqlx::query_as::<_, TourSummary>(
            r#"
            SELECT t.id, t.name AS tour_name, l.name AS lead_name,
                   t.type_of_tour AS tour_type, t.created_at,
                   l.phone AS lead_phone, l.email AS lead_email
            FROM tours t
            LEFT JOIN leads l ON t.lead_id = l.id
            ORDER BY t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_detail(&self, id: i64) -> AppResult<Option<TourDetail>> {
        let result = sqlx::query_as::<_, TourDetail>(
            r#"
            SELECT t.*, l.name AS lead_name, l.phone AS lead_phone, l.email AS lead_email,
                   v.assigned_driver_id AS assigned_driver
            FROM tours t
            LEFT JOIN leads l ON t.lead_id = l.id
            LEFT JOIN vehicles v ON t.vehicle_id = v.id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_pricing_inputs(&self, id: i64) -> AppResult<Option<TourPricingInputs>> {
        let result = sqlx::query_as::<_, TourPricingInputs>(
            "SELECT company_id, type_of_tour, distance_km, premium, price FROM tours WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Returns `false` when no tour has this id
    pub async fn update(&self, id: i64, changes: TourChanges) -> AppResult<bool> {
        let mut update = UpdateBuilder::new("tours");
        update
            .set_field("company_id", changes.company_id)
            .set_field("lead_id", changes.lead_id)
            .set_field("vehicle_id", changes.vehicle_id)
            .set_field("driver_id", changes.driver_id)
            .set_field("type_of_tour", changes.type_of_tour)
            .set_field("description", changes.description)
            .set_field("start_state", changes.start_state)
            .set_field("end_state", changes.end_state)
            .set_field("start_city", changes.start_city)
            .set_field("end_city", changes.end_city)
            .set_field("pickup_location", changes.pickup_location)
            .set_field("drop_location", changes.drop_location)
            .set_field("start_date", changes.start_date)
            .set_field("end_date", changes.end_date)
            .set_field("duration_days", changes.duration_days)
            .set_field("distance_km", changes.distance_km)
            .set_field("premium", changes.premium)
            .set_opt("price", changes.price)
            .set_field("total_amount", changes.total_amount);

        if update.is_empty() {
            return Err(AppError::NoFieldsToUpdate);
        }
        update.set_raw("updated_at = NOW()");

        let result = update.where_id(id).build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tours WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
