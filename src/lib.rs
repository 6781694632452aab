//! Tour booking backend
//!
//! REST API for a tours and travel agency: tours priced from company charges,
//! bookings seeded from tours with their financials kept consistent, and the
//! fleet (vehicles, drivers) whose availability follows booking status.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app_router;
pub use state::AppState;
