//! Authentication response value object.

use serde::{Deserialize, Serialize};

/// Result of a successful authentication, carried back to the API layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed JWT access token
    pub access_token: String,

    /// Token type for the Authorization header
    pub token_type: String,

    /// Seconds until the access token expires
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates a bearer-token response
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_response() {
        let response = AuthResponse::bearer("abc.def.ghi".to_string(), 28800);
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 28800);
    }
}
