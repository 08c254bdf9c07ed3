//! Main token service implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use cr_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, JWT_ISSUER};
use crate::domain::entities::user::User;
use crate::errors::{DomainResult, TokenError};

/// Service for issuing and verifying JWT access tokens (HS256)
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.validate_exp = true;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue an access token for a user
    ///
    /// # Returns
    /// * `Ok((token, expires_in))` - The signed token and its lifetime in seconds
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_access_token(&self, user: &User) -> DomainResult<(String, i64)> {
        let expires_in = self.config.access_token_expiry;
        let claims = Claims::for_user(user, expires_in);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)?;

        Ok((token, expires_in))
    }

    /// Verify an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|error| {
                use jsonwebtoken::errors::ErrorKind;
                let error = match error.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => {
                        TokenError::InvalidClaims
                    }
                    _ => TokenError::InvalidTokenFormat,
                };
                error.into()
            })
    }
}
