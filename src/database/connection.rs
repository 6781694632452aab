//! PostgreSQL connection
//!
//! Pool creation and schema migrations.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Creates the connection pool and checks it with a round trip
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!(url = %mask_database_url(&config.url), "Connecting to PostgreSQL");

    let pool = config.create_pool().await?;
    test_connection(&pool).await?;

    info!(
        max_connections = config.max_connections,
        "PostgreSQL pool ready"
    );
    Ok(pool)
}

async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Applies the migrations under `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Returns whether the store answers a trivial query
pub async fn ping(pool: &PgPool) -> bool {
    test_connection(pool).await.is_ok()
}

/// Hides credentials in a database URL before logging it
fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
