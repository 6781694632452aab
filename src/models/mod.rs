//! Data models
//!
//! Row types mapping the PostgreSQL schema in `migrations/`, plus the status
//! vocabularies shared by bookings, vehicles and drivers.

pub mod booking;
pub mod company;
pub mod driver;
pub mod lead;
pub mod tour;
pub mod user;
pub mod vehicle;
