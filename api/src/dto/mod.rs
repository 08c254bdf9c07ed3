//! Request and response data transfer objects.

pub mod auth_dto;
pub mod patient_dto;
pub mod user_dto;

// The error envelope is shared with the other layers
pub use cr_shared::types::response::ErrorResponse;
