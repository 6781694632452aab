//! Booking persistence
//!
//! Reads the joined snapshot the recalculator needs and writes the merged
//! changes back. Updates are a compare-and-swap on the `version` column so a
//! concurrent update of the same booking is detected instead of lost.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::booking::{BookingDetail, BookingSnapshot, BookingSummary, NewBooking};
use crate::models::tour::TourSeed;
use crate::repositories::UpdateBuilder;
use crate::services::booking_calculator::BookingChanges;
use crate::utils::errors::AppResult;

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Booking joined with its company charges and its vehicle's driver
    async fn find_snapshot(&self, id: i64) -> AppResult<Option<BookingSnapshot>>;

    /// Tour columns a new booking is seeded from
    async fn find_tour_seed(&self, tour_id: i64) -> AppResult<Option<TourSeed>>;

    async fn insert_booking(&self, booking: &NewBooking) -> AppResult<i64>;

    /// Writes the sequence label once the id is known
    async fn assign_name(&self, id: i64, name: &str) -> AppResult<()>;

    /// Applies `changes` if the row still has `expected_version`
    ///
    /// Returns `false` when the row changed (or vanished) since it was read.
    async fn apply_changes(
        &self,
        id: i64,
        expected_version: i32,
        changes: &BookingChanges,
    ) -> AppResult<bool>;
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_all(&self) -> AppResult<Vec<BookingSummary>> {
        let result = sqlx::query_as::<_, BookingSummary>(
            r#"
            SELECT b.id, b.name, b.type_of_tour AS tour_type, b.created_at,
                   b.status, l.name AS lead_name, t.name AS tour_name
            FROM bookings b
            LEFT JOIN leads l ON b.lead_id = l.id
            LEFT JOIN tours t ON b.tour_id = t.id
            ORDER BY b.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_detail(&self, id: i64) -> AppResult<Option<BookingDetail>> {
        let result = sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT b.*, l.phone AS lead_phone, l.email AS lead_email,
                   t.total_amount AS tour_total_amount
            FROM bookings b
            LEFT JOIN leads l ON b.lead_id = l.id
            LEFT JOIN tours t ON b.tour_id = t.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BookingStore for BookingRepository {
    async fn find_snapshot(&self, id: i64) -> AppResult<Option<BookingSnapshot>> {
        let result = sqlx::query_as::<_, BookingSnapshot>(
            r#"
            SELECT b.id, b.total_amount, b.actual_total_amount, b.booked_distance_km,
                   b.actual_distance_km, b.amount_paid, b.outstanding_amount,
                   b.expenses, b.toll_tax, b.profit, b.type_of_tour,
                   b.vehicle_id, b.driver_id, b.status, b.version,
                   c.localcharge, c.outstationcharge, c.lumpsumcharge,
                   v.assigned_driver_id AS vehicle_assigned_driver_id
            FROM bookings b
            LEFT JOIN companies c ON b.company_id = c.id
            LEFT JOIN vehicles v ON b.vehicle_id = v.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn find_tour_seed(&self, tour_id: i64) -> AppResult<Option<TourSeed>> {
        let result = sqlx::query_as::<_, TourSeed>(
            r#"
            SELECT start_date, end_date, distance_km, total_amount, duration_days, type_of_tour
            FROM tours
            WHERE id = $1
            "#,
        )
        .bind(tour_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> AppResult<i64> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO bookings (
                company_id, lead_id, vehicle_id, driver_id, tour_id,
                booking_date, booking_end_date, booked_distance_km,
                total_amount, actual_total_amount, duration, type_of_tour, status,
                actual_distance_km, amount_paid, actual_duration, expenses, toll_tax,
                outstanding_amount, profit
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                    $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            RETURNING id
            "#,
        )
        .bind(booking.company_id)
        .bind(booking.lead_id)
        .bind(booking.vehicle_id)
        .bind(booking.driver_id)
        .bind(booking.tour_id)
        .bind(booking.booking_date)
        .bind(booking.booking_end_date)
        .bind(booking.booked_distance_km)
        .bind(booking.total_amount)
        .bind(booking.actual_total_amount)
        .bind(booking.duration)
        .bind(&booking.type_of_tour)
        .bind(&booking.status)
        .bind(booking.actual_distance_km)
        .bind(booking.amount_paid)
        .bind(booking.actual_duration)
        .bind(booking.expenses)
        .bind(booking.toll_tax)
        .bind(booking.outstanding_amount)
        .bind(booking.profit)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn assign_name(&self, id: i64, name: &str) -> AppResult<()> {
        sqlx::query("UPDATE bookings SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn apply_changes(
        &self,
        id: i64,
        expected_version: i32,
        changes: &BookingChanges,
    ) -> AppResult<bool> {
        let changes = changes.clone();
        let mut update = UpdateBuilder::new("bookings");
        update
            .set_field("vehicle_id", changes.vehicle_id)
            .set_field("driver_id", changes.driver_id)
            .set_opt("actual_distance_km", changes.actual_distance_km)
            .set_opt("actual_total_amount", changes.actual_total_amount)
            .set_opt("amount_paid", changes.amount_paid)
            .set_opt("outstanding_amount", changes.outstanding_amount)
            .set_opt("expenses", changes.expenses)
            .set_opt("toll_tax", changes.toll_tax)
            .set_opt("profit", changes.profit)
            .set_field("company_id", changes.company_id)
            .set_field("lead_id", changes.lead_id)
            .set_field("tour_id", changes.tour_id)
            .set_field("booking_date", changes.booking_date)
            .set_field("booking_end_date", changes.booking_end_date)
            .set_field("booked_distance_km", changes.booked_distance_km)
            .set_field("total_amount", changes.total_amount)
            .set_field("status", changes.status)
            .set_raw("version = version + 1")
            .set_raw("updated_at = NOW()");

        let mut query = update.where_id(id);
        query.push(" AND version = ").push_bind(expected_version);

        let result = query.build().execute(&self.pool).await?;
        Ok(result.rows_affected() == 1)
    }
}
