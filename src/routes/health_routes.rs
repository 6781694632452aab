use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::health_controller::{HealthController, HealthStatus};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(ready))
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthController::new(&state).health())
}

async fn ready(State(state): State<AppState>) -> Result<Json<HealthStatus>, AppError> {
    let status = HealthController::new(&state).ready().await?;
    Ok(Json(status))
}
