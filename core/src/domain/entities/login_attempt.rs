//! Failed login attempt record used by the login throttle.
//!
//! Attempts are append-only: one row per failed credential check, cleared in
//! bulk on the next successful login from the same address. The lock state of
//! an address is never stored as a flag; it is derived at read time from the
//! presence of any record whose `locked_until` lies in the future.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single failed login attempt from a client address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedLoginAttempt {
    /// Client network address the attempt came from
    pub ip: String,

    /// Username submitted with the attempt; not validated against accounts
    pub username: String,

    /// When the attempt happened
    pub occurred_at: DateTime<Utc>,

    /// Lock expiry carried by this record, set only on the attempt that
    /// crossed the failure threshold
    pub locked_until: Option<DateTime<Utc>>,
}

impl FailedLoginAttempt {
    /// Creates a record for a failure that did not trigger a lock
    pub fn new(ip: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            username: username.into(),
            occurred_at: Utc::now(),
            locked_until: None,
        }
    }

    /// Attaches a lock expiry to this record
    pub fn with_lock(mut self, locked_until: DateTime<Utc>) -> Self {
        self.locked_until = Some(locked_until);
        self
    }

    /// Whether this record carries a lock still active at `now`
    pub fn locks_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.locked_until, Some(until) if until > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_plain_attempt_carries_no_lock() {
        let attempt = FailedLoginAttempt::new("10.0.0.5", "mrodriguez");
        assert_eq!(attempt.locked_until, None);
        assert!(!attempt.locks_at(Utc::now()));
    }

    #[test]
    fn test_lock_is_active_until_expiry() {
        let now = Utc::now();
        let attempt =
            FailedLoginAttempt::new("10.0.0.5", "mrodriguez").with_lock(now + Duration::hours(2));

        assert!(attempt.locks_at(now));
        assert!(attempt.locks_at(now + Duration::minutes(119)));
        assert!(!attempt.locks_at(now + Duration::hours(2)));
        assert!(!attempt.locks_at(now + Duration::hours(3)));
    }
}
