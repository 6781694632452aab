//! Shared application state
//!
//! Cloned into every handler through axum's `State` extractor.

use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;

use crate::config::EnvironmentConfig;
use crate::middleware::RateLimitState;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub auth_rate_limit: RateLimitState,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            auth_rate_limit: RateLimitState::for_auth(&config),
            pool,
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}
