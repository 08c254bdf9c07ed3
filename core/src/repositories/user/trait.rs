//! User repository trait defining the interface for account persistence.
//!
//! This module defines the repository pattern interface for User entities.
//! The trait is async-first and uses Result types for proper error handling.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations of this trait handle the actual database operations while
/// maintaining the abstraction boundary between domain and infrastructure
/// layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its login name
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Account found
    /// * `Ok(None)` - No account with the given username
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find an account by its identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// List all accounts, ordered by id
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Create a new account
    ///
    /// # Returns
    /// * `Ok(User)` - The created account with its store-assigned id
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate username)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing account
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete an account
    ///
    /// # Returns
    /// * `Ok(true)` - Account was deleted
    /// * `Ok(false)` - Account not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Check whether an account exists with the given username
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError>;
}
