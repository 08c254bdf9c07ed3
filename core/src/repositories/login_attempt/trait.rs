//! Login attempt repository trait backing the login throttle.
//!
//! The throttle needs exactly four operations: a recent-failure count, an
//! insert, a read of the currently active lock, and a bulk clear. Keeping the
//! seam this narrow lets the throttle logic run unchanged against the
//! in-memory mock in unit tests and against MySQL in production.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::login_attempt::FailedLoginAttempt;
use crate::errors::DomainError;

/// Repository trait for failed login attempt persistence
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    /// Count failed attempts from `ip` with `occurred_at` at or after `since`
    ///
    /// # Returns
    /// * `Ok(count)` - Number of attempts inside the window
    /// * `Err(DomainError)` - Database or other error occurred
    async fn count_failures_since(
        &self,
        ip: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Append a failed attempt record
    ///
    /// The record may carry a `locked_until` expiry when the attempt crossed
    /// the failure threshold; the store persists it on the inserted row.
    async fn insert(&self, attempt: FailedLoginAttempt) -> Result<(), DomainError>;

    /// Read the latest lock expiry for `ip` that is strictly later than `now`
    ///
    /// # Returns
    /// * `Ok(Some(expiry))` - The address is locked until `expiry`
    /// * `Ok(None)` - No active lock; expired locks are never surfaced
    /// * `Err(DomainError)` - Database or other error occurred
    async fn active_lock_expiry(
        &self,
        ip: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Delete every attempt record for `ip`
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records removed
    async fn clear_for_ip(&self, ip: &str) -> Result<u64, DomainError>;
}
