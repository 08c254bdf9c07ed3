//! Domain-specific error types for authentication and related operations
//!
//! This module provides error type definitions for authentication, token
//! management, and validation operations. The user-facing messages are
//! configured in the presentation layer for internationalization support.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Generic credential failure; deliberately does not say whether the
    /// username or the password was wrong
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Too many failed login attempts: retry in {minutes} minutes")]
    TooManyFailedLogins { minutes: u32 },

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },

    #[error("Invalid date")]
    InvalidDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let message = AuthError::InvalidCredentials.to_string();
        assert!(!message.to_lowercase().contains("username was"));
        assert!(!message.to_lowercase().contains("password was"));
        assert_eq!(message, "Invalid username or password");
    }

    #[test]
    fn test_lockout_message_carries_minutes() {
        let error = AuthError::TooManyFailedLogins { minutes: 115 };
        assert!(error.to_string().contains("115 minutes"));
    }
}
