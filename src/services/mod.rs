//! Services module
//!
//! Business logic: tour pricing, booking recalculation and creation, fleet
//! status synchronization and authentication.

pub mod auth_service;
pub mod booking_calculator;
pub mod booking_service;
pub mod fleet_sync;
pub mod pricing_service;

#[cfg(test)]
pub mod test_support;
