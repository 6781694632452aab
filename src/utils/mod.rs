//! Shared utilities
//!
//! Error handling, exact money arithmetic, partial-update fields, validation
//! and JWT helpers.

pub mod errors;
pub mod field;
pub mod jwt;
pub mod money;
pub mod validation;
