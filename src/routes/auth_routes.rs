use axum::{
    extract::State,
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use tracing::info;

use crate::controllers::auth_controller::{auth_cookie, clear_auth_cookie, AuthController};
use crate::dto::api_response::ApiResponse;
use crate::dto::user_dto::{CreateUserRequest, LoginRequest};
use crate::middleware::{auth_middleware, auth_rate_limit_middleware, AuthenticatedUser};
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// `register`/`login` are rate limited, `me`/`logout` need a session
pub fn create_auth_router(state: &AppState) -> Router<AppState> {
    let credentials = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_rate_limit_middleware,
        ));

    let session = Router::new()
        .route("/me", get(me))
        .route("/logout", post(logout))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    credentials.merge(session)
}

async fn register(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.register(request).await?;
    Ok(response.into_created())
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let response = controller.login(request).await?;

    let cookie = auth_cookie(
        &response.token,
        response.expires_in,
        state.config.is_production(),
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success_with_message(response, "Login successful")),
    ))
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = AuthController::new(state.pool.clone(), &state.config);
    let profile = controller.me(user.user_id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> impl IntoResponse {
    info!(user_id = user.user_id, "User logged out");
    (
        [(header::SET_COOKIE, clear_auth_cookie(state.config.is_production()))],
        Json(ApiResponse::message("Logged out successfully")),
    )
}
