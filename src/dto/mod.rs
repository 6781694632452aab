//! Request and response bodies

pub mod api_response;
pub mod booking_dto;
pub mod company_dto;
pub mod driver_dto;
pub mod lead_dto;
pub mod tour_dto;
pub mod user_dto;
pub mod vehicle_dto;

pub use api_response::{ApiResponse, CreatedResponse};
