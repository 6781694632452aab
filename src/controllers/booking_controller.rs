use std::sync::Arc;

use sqlx::PgPool;

use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::{CreateBookingRequest, UpdateBookingRequest};
use crate::models::booking::{BookingDetail, BookingSummary};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::fleet_repository::FleetRepository;
use crate::services::booking_service::{BookingCreated, BookingService, BookingUpdateOutcome};
use crate::utils::errors::{not_found_error, AppError};

pub struct BookingController {
    repository: Arc<BookingRepository>,
    service: BookingService,
}

impl BookingController {
    pub fn new(pool: PgPool) -> Self {
        let repository = Arc::new(BookingRepository::new(pool.clone()));
        let service = BookingService::new(
            repository.clone(),
            Arc::new(FleetRepository::new(pool)),
        );

        Self {
            repository,
            service,
        }
    }

    pub async fn list(&self) -> Result<Vec<BookingSummary>, AppError> {
        self.repository.list_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<BookingDetail, AppError> {
        self.repository
            .find_detail(id)
            .await?
            .ok_or_else(|| not_found_error("Booking", id))
    }

    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingCreated>, AppError> {
        let draft = request.into_draft()?;
        let created = self.service.create_booking_from_tour(draft).await?;

        Ok(ApiResponse::success_with_message(
            created,
            "Booking created successfully",
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateBookingRequest,
    ) -> Result<ApiResponse<BookingUpdateOutcome>, AppError> {
        let patch = request.into_patch()?;
        let outcome = self.service.apply_booking_update(id, patch).await?;

        Ok(ApiResponse::success_with_message(
            outcome,
            "Booking details updated successfully",
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Booking", id));
        }
        Ok(())
    }
}
