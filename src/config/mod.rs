//! Configuration
//!
//! Server and database settings loaded from the environment.

pub mod database;
pub mod environment;

pub use database::DatabaseConfig;
pub use environment::EnvironmentConfig;
