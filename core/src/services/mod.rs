//! Business services of the domain layer.

pub mod auth;
pub mod patient;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig, LockStatus, LoginThrottle, ThrottleConfig};
pub use patient::PatientService;
pub use token::TokenService;
