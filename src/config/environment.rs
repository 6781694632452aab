//! Environment configuration
//!
//! Reads the server settings from environment variables (optionally loaded
//! from `.env`). Missing or malformed values are reported as errors at
//! startup.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub auth_rate_limit_requests: u32,
    /// Window of the auth rate limiter in seconds
    pub auth_rate_limit_window: u64,
    /// Key the rate limiter on `x-forwarded-for`; only set behind a proxy
    /// that overwrites the header
    pub trust_proxy: bool,
    pub request_timeout_secs: u64,
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.trim().is_empty() {
            return Err(anyhow!("JWT_SECRET must not be empty"));
        }

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_var("PORT", 5000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 900)?,
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            auth_rate_limit_requests: parse_var("AUTH_RATE_LIMIT_REQUESTS", 10)?,
            auth_rate_limit_window: parse_var("AUTH_RATE_LIMIT_WINDOW", 900)?,
            trust_proxy: parse_var("TRUST_PROXY", false)?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
