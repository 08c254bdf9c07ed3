//! Account management DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use cr_core::domain::entities::user::{User, UserRole};

/// Account representation returned by the API; never carries the hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request body for PUT /api/v1/users/{id}
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// Login name
    #[validate(length(min = 3, max = 100, message = "username must be 3-100 characters"))]
    pub username: String,

    /// New password; omit to keep the current one
    #[validate(length(min = 8, max = 100, message = "password must be 8-100 characters"))]
    pub password: Option<String>,

    /// Role for the account
    pub role: UserRole,
}
