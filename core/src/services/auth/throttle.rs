//! Login throttle: IP-based failed-login counting with timed lockout.
//!
//! The throttle sits in front of credential verification. A login request
//! first asks `check_lock` whether the client address is locked; after the
//! password comparison the caller reports the outcome through
//! `record_failure` or `clear_attempts`.
//!
//! Lock state is never stored as a flag. An address counts as locked exactly
//! when any of its attempt records carries a `locked_until` in the future, so
//! locks expire lazily at read time and no unlock write or background sweeper
//! exists. `check_lock` and `record_failure` are two separate round trips to
//! the store; two racing requests from one address can both cross the
//! threshold and both write a lock expiry, which is harmless since the later
//! expiry simply wins.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, warn};

use crate::domain::entities::login_attempt::FailedLoginAttempt;
use crate::errors::DomainResult;
use crate::repositories::LoginAttemptRepository;

/// Configuration for the login throttle
///
/// Constructed once at startup; the window and lock duration are never varied
/// per call.
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    /// Trailing window in which failures are counted, in minutes
    pub window_minutes: i64,
    /// How long an address stays locked once triggered, in minutes
    pub lock_minutes: i64,
    /// Number of failures inside the window that triggers the lock;
    /// the default locks on the 3rd failure
    pub failure_threshold: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            window_minutes: 120,
            lock_minutes: 120,
            failure_threshold: 3,
        }
    }
}

/// Lock state of a client address as seen by `check_lock`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockStatus {
    /// No active lock; the login may proceed to the credential check
    Open,
    /// Locked: the login must be rejected without comparing the password
    Locked {
        /// When the lock expires
        locked_until: DateTime<Utc>,
        /// Remaining wait in whole minutes, rounded up
        retry_after_minutes: u32,
    },
}

impl LockStatus {
    /// Whether the address is currently locked
    pub fn is_locked(&self) -> bool {
        matches!(self, LockStatus::Locked { .. })
    }
}

/// Service tracking failed logins per client address and imposing lockouts
pub struct LoginThrottle<R>
where
    R: LoginAttemptRepository,
{
    repository: Arc<R>,
    config: ThrottleConfig,
}

impl<R> LoginThrottle<R>
where
    R: LoginAttemptRepository,
{
    /// Create a new login throttle
    pub fn new(repository: Arc<R>, config: ThrottleConfig) -> Self {
        Self { repository, config }
    }

    /// Create a new login throttle with default configuration
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self::new(repository, ThrottleConfig::default())
    }

    /// Check whether `ip` is currently locked out
    ///
    /// Read-only. Storage errors are surfaced to the caller: a failure here
    /// must not silently bypass the lock.
    ///
    /// # Returns
    /// * `Ok(LockStatus::Open)` - Logins from the address may proceed
    /// * `Ok(LockStatus::Locked { .. })` - Address locked, with remaining wait
    /// * `Err(DomainError)` - Storage failure
    pub async fn check_lock(&self, ip: &str) -> DomainResult<LockStatus> {
        let now = Utc::now();

        match self.repository.active_lock_expiry(ip, now).await? {
            Some(locked_until) => Ok(LockStatus::Locked {
                locked_until,
                retry_after_minutes: minutes_until(locked_until, now),
            }),
            None => Ok(LockStatus::Open),
        }
    }

    /// Record a failed credential check from `ip`
    ///
    /// Counts the failures inside the trailing window, then appends the new
    /// record; when the pre-insert count says this is the attempt that
    /// crosses the threshold, the inserted record carries the lock expiry.
    ///
    /// Storage errors are logged and swallowed: bookkeeping must never affect
    /// the login response already owed to the caller.
    pub async fn record_failure(&self, ip: &str, username: &str) {
        if let Err(error) = self.try_record_failure(ip, username).await {
            error!(ip, %error, "failed to record login failure");
        }
    }

    async fn try_record_failure(&self, ip: &str, username: &str) -> DomainResult<()> {
        let now = Utc::now();
        let since = now - Duration::minutes(self.config.window_minutes);

        // Counted before the insert so the lock lands exactly on the
        // threshold attempt, not one later.
        let prior_failures = self.repository.count_failures_since(ip, since).await?;

        let mut attempt = FailedLoginAttempt::new(ip, username);
        attempt.occurred_at = now;

        if prior_failures + 1 >= self.config.failure_threshold {
            let locked_until = now + Duration::minutes(self.config.lock_minutes);
            attempt = attempt.with_lock(locked_until);
            warn!(
                ip,
                failures = prior_failures + 1,
                %locked_until,
                "address locked after repeated login failures"
            );
        }

        self.repository.insert(attempt).await
    }

    /// Forget every failed attempt from `ip`
    ///
    /// Called once per successful login, before token issuance. Storage
    /// errors are logged and swallowed.
    pub async fn clear_attempts(&self, ip: &str) {
        match self.repository.clear_for_ip(ip).await {
            Ok(removed) => {
                if removed > 0 {
                    debug!(ip, removed, "cleared failed login attempts");
                }
            }
            Err(error) => error!(ip, %error, "failed to clear login attempts"),
        }
    }
}

/// Whole minutes from `now` until `until`, rounded up
fn minutes_until(until: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let millis = (until - now).num_milliseconds().max(0);
    ((millis + 59_999) / 60_000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_until_rounds_up() {
        let now = Utc::now();
        assert_eq!(minutes_until(now + Duration::minutes(120), now), 120);
        assert_eq!(minutes_until(now + Duration::seconds(61), now), 2);
        assert_eq!(minutes_until(now + Duration::seconds(1), now), 1);
        assert_eq!(minutes_until(now, now), 0);
        assert_eq!(minutes_until(now - Duration::minutes(5), now), 0);
    }
}
