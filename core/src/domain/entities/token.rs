//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::{User, UserRole};
use crate::errors::{DomainError, TokenError};

/// JWT issuer
pub const JWT_ISSUER: &str = "carerecord";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Login name of the account
    pub username: String,

    /// Role of the account ("admin" or "user")
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Builds claims for an access token valid for `expiry_seconds`
    pub fn for_user(user: &User, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry_seconds)).timestamp(),
            iss: JWT_ISSUER.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parses the subject claim back into a user id
    pub fn user_id(&self) -> Result<i64, DomainError> {
        self.sub
            .parse()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))
    }

    /// Parses the role claim
    pub fn user_role(&self) -> Result<UserRole, DomainError> {
        UserRole::parse(&self.role).ok_or(DomainError::Token(TokenError::InvalidClaims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let mut user = User::new("jperez".to_string(), "hash".to_string(), UserRole::Admin);
        user.id = 7;
        user
    }

    #[test]
    fn test_claims_for_user() {
        let claims = Claims::for_user(&sample_user(), 28800);

        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "jperez");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 28800);
        assert_eq!(claims.iss, JWT_ISSUER);
    }

    #[test]
    fn test_claims_accessors() {
        let claims = Claims::for_user(&sample_user(), 60);
        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.user_role().unwrap(), UserRole::Admin);
    }

    #[test]
    fn test_invalid_subject_is_rejected() {
        let mut claims = Claims::for_user(&sample_user(), 60);
        claims.sub = "not-a-number".to_string();
        assert!(claims.user_id().is_err());
    }
}
