//! Database module
//!
//! Connection pool and migrations for PostgreSQL.

pub mod connection;

pub use connection::{create_pool, ping, run_migrations};
