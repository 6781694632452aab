use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::controllers::company_controller::CompanyController;
use crate::dto::api_response::{ApiResponse, CreatedResponse};
use crate::dto::company_dto::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::models::company::{Company, CompanyPick};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route("/companypicklist", get(company_picklist))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}

async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(response.into_created())
}

async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Company>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let company = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(company)))
}

async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Company>>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let companies = controller.list().await?;
    Ok(Json(ApiResponse::success(companies)))
}

async fn company_picklist(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CompanyPick>>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let companies = controller.picklist().await?;
    Ok(Json(ApiResponse::success(companies)))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Company deleted successfully")))
}
