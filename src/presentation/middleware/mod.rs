//! Middleware and extractors for HTTP request processing
//!
//! - Bearer token authentication and the administrator guard
//! - Header-level request validation
//! - Error envelope with the request id stamped in

pub mod auth;
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use auth::{AdminUser, Claims, JwtService, UserContext};
pub use error::{AppError, ErrorResponse};
pub use validation::{RequestValidator, ValidationConfig};
