use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::api_response::ApiResponse;
use crate::dto::booking_dto::{CreateBookingRequest, UpdateBookingRequest};
use crate::models::booking::{BookingDetail, BookingSummary};
use crate::services::booking_service::{BookingCreated, BookingUpdateOutcome};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route(
            "/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}

async fn list_bookings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BookingSummary>>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let bookings = controller.list().await?;
    Ok(Json(ApiResponse::success(bookings)))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<BookingDetail>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let booking = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(booking)))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingCreated>>), AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(response.into_created())
}

async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingUpdateOutcome>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BookingController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Booking deleted successfully")))
}
