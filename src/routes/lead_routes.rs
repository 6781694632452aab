use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::lead_controller::LeadController;
use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::lead_dto::{CreateLeadRequest, UpdateLeadRequest};
use crate::models::lead::{Lead, LeadPick};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_lead_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_leads).post(create_lead))
        .route("/leadpicklist", get(lead_picklist))
        .route("/:id", get(get_lead).put(update_lead).delete(delete_lead))
}

async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let controller = LeadController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(response.into_created())
}

async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Lead>>, AppError> {
    let controller = LeadController::new(state.pool.clone());
    let lead = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(lead)))
}

async fn list_leads(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Lead>>>, AppError> {
    let controller = LeadController::new(state.pool.clone());
    let leads = controller.list().await?;
    Ok(Json(ApiResponse::success(leads)))
}

async fn lead_picklist(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeadPick>>>, AppError> {
    let controller = LeadController::new(state.pool.clone());
    let leads = controller.picklist().await?;
    Ok(Json(ApiResponse::success(leads)))
}

async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateLeadRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = LeadController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = LeadController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Lead deleted successfully")))
}
