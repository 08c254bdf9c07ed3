//! Mock implementation of LoginAttemptRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::login_attempt::FailedLoginAttempt;
use crate::errors::DomainError;

use super::trait_::LoginAttemptRepository;

/// In-memory login attempt store for unit tests
///
/// Besides the trait operations it offers two test helpers: `fail_next_ops`
/// makes subsequent operations return a storage error (for exercising the
/// throttle's error paths), and `rewind` shifts every stored timestamp into
/// the past, which simulates the clock moving forward.
pub struct MockLoginAttemptRepository {
    attempts: Arc<RwLock<Vec<FailedLoginAttempt>>>,
    fail_ops: Arc<RwLock<bool>>,
}

impl MockLoginAttemptRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(Vec::new())),
            fail_ops: Arc::new(RwLock::new(false)),
        }
    }

    /// Make every subsequent operation fail (or succeed again)
    pub async fn fail_next_ops(&self, fail: bool) {
        *self.fail_ops.write().await = fail;
    }

    /// Shift all stored timestamps `duration` into the past
    pub async fn rewind(&self, duration: Duration) {
        let mut attempts = self.attempts.write().await;
        for attempt in attempts.iter_mut() {
            attempt.occurred_at = attempt.occurred_at - duration;
            if let Some(until) = attempt.locked_until {
                attempt.locked_until = Some(until - duration);
            }
        }
    }

    /// Number of stored records for `ip`, locked or not
    pub async fn stored_count(&self, ip: &str) -> usize {
        let attempts = self.attempts.read().await;
        attempts.iter().filter(|a| a.ip == ip).count()
    }

    async fn check_failure(&self) -> Result<(), DomainError> {
        if *self.fail_ops.read().await {
            return Err(DomainError::Internal {
                message: "simulated storage failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockLoginAttemptRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoginAttemptRepository for MockLoginAttemptRepository {
    async fn count_failures_since(
        &self,
        ip: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        self.check_failure().await?;
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.ip == ip && a.occurred_at >= since)
            .count() as u64)
    }

    async fn insert(&self, attempt: FailedLoginAttempt) -> Result<(), DomainError> {
        self.check_failure().await?;
        let mut attempts = self.attempts.write().await;
        attempts.push(attempt);
        Ok(())
    }

    async fn active_lock_expiry(
        &self,
        ip: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        self.check_failure().await?;
        let attempts = self.attempts.read().await;
        Ok(attempts
            .iter()
            .filter(|a| a.ip == ip)
            .filter_map(|a| a.locked_until)
            .filter(|until| *until > now)
            .max())
    }

    async fn clear_for_ip(&self, ip: &str) -> Result<u64, DomainError> {
        self.check_failure().await?;
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|a| a.ip != ip);
        Ok((before - attempts.len()) as u64)
    }
}
