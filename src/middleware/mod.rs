//! HTTP middleware: authentication, CORS and rate limiting

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{auth_middleware, AuthenticatedUser};
pub use cors::cors_layer;
pub use rate_limit::{auth_rate_limit_middleware, RateLimitState};
