//! HTTP routes
//!
//! Every resource router is nested under `/api`. All of them except
//! `auth/register`, `auth/login` and `health` sit behind the JWT middleware.

pub mod auth_routes;
pub mod booking_routes;
pub mod company_routes;
pub mod driver_routes;
pub mod health_routes;
pub mod lead_routes;
pub mod tour_routes;
pub mod user_routes;
pub mod vehicle_routes;

use std::time::Duration;

use axum::{
    http::{StatusCode, Uri},
    middleware,
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/bookings", booking_routes::create_booking_router())
        .nest("/tours", tour_routes::create_tour_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/companies", company_routes::create_company_router())
        .nest("/leads", lead_routes::create_lead_router())
        .nest("/users", user_routes::create_user_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", auth_routes::create_auth_router(&state))
        .nest("/health", health_routes::create_health_router())
        .merge(protected);

    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api", api)
        .fallback(invalid_route)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(cors),
        )
        .with_state(state)
}

async fn invalid_route(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Invalid API Route",
            "path": uri.path(),
        })),
    )
}
