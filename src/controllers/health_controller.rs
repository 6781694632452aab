use serde::Serialize;

use crate::database::ping;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub const SERVICE_NAME: &str = "tour-booking-api";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub env: String,
}

pub struct HealthController<'a> {
    state: &'a AppState,
}

impl<'a> HealthController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status(&self, status: &'static str) -> HealthStatus {
        HealthStatus {
            status,
            service: SERVICE_NAME,
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.state.started_at.elapsed().as_secs(),
            env: self.state.config.environment.clone(),
        }
    }

    pub fn health(&self) -> HealthStatus {
        self.status("ok")
    }

    /// Fails with 503 while the database is unreachable
    pub async fn ready(&self) -> Result<HealthStatus, AppError> {
        if !ping(&self.state.pool).await {
            return Err(AppError::ServiceUnavailable(
                "Database is not reachable".to_string(),
            ));
        }
        Ok(self.status("ready"))
    }
}
