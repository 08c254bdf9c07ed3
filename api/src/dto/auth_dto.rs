//! Authentication request/response DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use cr_core::domain::entities::user::UserRole;
use cr_core::domain::value_objects::AuthResponse;

/// Request body for POST /api/v1/auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, max = 100, message = "username must be 1-100 characters"))]
    pub username: String,

    /// Plaintext password
    #[validate(length(min = 1, max = 100, message = "password must be 1-100 characters"))]
    pub password: String,
}

/// Response body for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed JWT access token
    pub token: String,

    /// Token type for the Authorization header
    pub token_type: String,

    /// Seconds until the token expires
    pub expires_in: i64,
}

impl From<AuthResponse> for LoginResponse {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
        }
    }
}

/// Request body for POST /api/v1/auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name for the new account
    #[validate(length(min = 3, max = 100, message = "username must be 3-100 characters"))]
    pub username: String,

    /// Plaintext password for the new account
    #[validate(length(min = 8, max = 100, message = "password must be 8-100 characters"))]
    pub password: String,

    /// Role for the new account
    pub role: UserRole,
}
