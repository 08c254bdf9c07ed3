//! Main authentication service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::user::{User, UserRole};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{LoginAttemptRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, verify_password};
use super::throttle::{LockStatus, LoginThrottle};

/// Authentication service for login, registration and account management
pub struct AuthService<U, L>
where
    U: UserRepository,
    L: LoginAttemptRepository,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Login throttle guarding the credential check
    throttle: Arc<LoginThrottle<L>>,
    /// Token service for JWT issuance
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, L> AuthService<U, L>
where
    U: UserRepository,
    L: LoginAttemptRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for account persistence
    /// * `throttle` - Login throttle guarding the credential check
    /// * `token_service` - Service for JWT management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        throttle: Arc<LoginThrottle<L>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            throttle,
            token_service,
            config,
        }
    }

    /// Authenticate a username/password pair coming from `client_ip`
    ///
    /// The lock check is a mandatory precondition: a locked address is
    /// rejected with the remaining wait before the password is ever compared,
    /// and no failure is recorded for it, so a lock cannot extend itself.
    /// A storage failure during the lock check surfaces as an internal error
    /// rather than letting the login bypass the throttle.
    ///
    /// # Returns
    /// * `Ok(AuthResponse)` - Authentication succeeded, token issued
    /// * `Err(DomainError)` - Lockout, bad credentials, or internal failure
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        client_ip: &str,
    ) -> DomainResult<AuthResponse> {
        if let LockStatus::Locked {
            retry_after_minutes,
            ..
        } = self.throttle.check_lock(client_ip).await?
        {
            warn!(
                ip = client_ip,
                retry_after_minutes, "login rejected: address is locked"
            );
            return Err(AuthError::TooManyFailedLogins {
                minutes: retry_after_minutes,
            }
            .into());
        }

        let user = self.user_repository.find_by_username(username).await?;

        let verified = match &user {
            Some(user) => verify_password(password, &user.password_hash)?,
            None => false,
        };

        match user {
            Some(user) if verified => {
                self.throttle.clear_attempts(client_ip).await;

                let (access_token, expires_in) = self.token_service.issue_access_token(&user)?;
                info!(username = %user.username, "login succeeded");
                Ok(AuthResponse::bearer(access_token, expires_in))
            }
            // Unknown username and wrong password are indistinguishable to
            // the caller.
            _ => {
                self.throttle.record_failure(client_ip, username).await;

                // When this failure was the one that crossed the threshold,
                // the response already carries the lockout message. The probe
                // is advisory: if it fails the generic answer stands.
                if let Ok(LockStatus::Locked {
                    retry_after_minutes,
                    ..
                }) = self.throttle.check_lock(client_ip).await
                {
                    return Err(AuthError::TooManyFailedLogins {
                        minutes: retry_after_minutes,
                    }
                    .into());
                }

                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Register a new account
    ///
    /// # Returns
    /// * `Ok(User)` - The created account
    /// * `Err(DomainError)` - Username taken or storage failure
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        if self.user_repository.exists_by_username(username).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        let user = self
            .user_repository
            .create(User::new(username.to_string(), password_hash, role))
            .await?;

        info!(username = %user.username, role = user.role.as_str(), "account registered");
        Ok(user)
    }

    /// List all accounts
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.user_repository.list().await
    }

    /// Update an account's username, role, and optionally its password
    pub async fn update_user(
        &self,
        id: i64,
        username: &str,
        password: Option<&str>,
        role: UserRole,
    ) -> DomainResult<User> {
        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.username != username {
            if self.user_repository.exists_by_username(username).await? {
                return Err(AuthError::UserAlreadyExists.into());
            }
            user.username = username.to_string();
        }

        user.set_role(role);
        if let Some(password) = password {
            user.set_password_hash(hash_password(password, self.config.bcrypt_cost)?);
        }

        self.user_repository.update(user).await
    }

    /// Delete an account
    pub async fn delete_user(&self, id: i64) -> DomainResult<()> {
        if !self.user_repository.delete(id).await? {
            return Err(AuthError::UserNotFound.into());
        }
        Ok(())
    }
}
