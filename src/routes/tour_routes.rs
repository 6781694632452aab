use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::tour_controller::{TourController, TourCreated};
use crate::dto::api_response::ApiResponse;
use crate::dto::tour_dto::{CreateTourRequest, UpdateTourRequest};
use crate::models::tour::{TourDetail, TourSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tour_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tours).post(create_tour))
        .route("/:id", get(get_tour).put(update_tour).delete(delete_tour))
}

async fn list_tours(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TourSummary>>>, AppError> {
    let controller = TourController::new(state.pool.clone());
    let tours = controller.list().await?;
    Ok(Json(ApiResponse::success(tours)))
}

async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<TourDetail>>, AppError> {
    let controller = TourController::new(state.pool.clone());
    let tour = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(tour)))
}

async fn create_tour(
    State(state): State<AppState>,
    Json(request): Json<CreateTourRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TourCreated>>), AppError> {
    let controller = TourController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(response.into_created())
}

async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTourRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TourController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = TourController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Tour deleted successfully")))
}
