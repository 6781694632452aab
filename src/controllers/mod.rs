//! Controllers
//!
//! One controller per resource; each owns the repositories and services its
//! handlers need.

pub mod auth_controller;
pub mod booking_controller;
pub mod company_controller;
pub mod driver_controller;
pub mod health_controller;
pub mod lead_controller;
pub mod tour_controller;
pub mod user_controller;
pub mod vehicle_controller;
