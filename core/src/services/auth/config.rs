//! Configuration for the authentication service

/// Configuration for `AuthService`
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Bcrypt cost factor used when hashing new passwords
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthServiceConfig {
    /// Configuration with a reduced bcrypt cost for tests
    pub fn for_tests() -> Self {
        Self { bcrypt_cost: 4 }
    }
}
