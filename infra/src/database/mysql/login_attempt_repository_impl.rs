//! MySQL implementation of the LoginAttemptRepository trait.
//!
//! Backs the login throttle with the append-only `login_attempts` table:
//!
//! ```sql
//! CREATE TABLE login_attempts (
//!     id           BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
//!     ip           VARCHAR(45)  NOT NULL,
//!     username     VARCHAR(100) NOT NULL,
//!     occurred_at  DATETIME(3)  NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
//!     locked_until DATETIME(3)  NULL,
//!     KEY idx_login_attempts_ip_occurred (ip, occurred_at),
//!     KEY idx_login_attempts_ip_locked (ip, locked_until)
//! );
//! ```
//!
//! Rows are only ever inserted and bulk-deleted; a lock expiring never
//! touches the table, since "locked" is answered by the timestamp comparison
//! in `active_lock_expiry`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use cr_core::domain::entities::login_attempt::FailedLoginAttempt;
use cr_core::errors::DomainError;
use cr_core::repositories::LoginAttemptRepository;

/// MySQL implementation of LoginAttemptRepository
pub struct MySqlLoginAttemptRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlLoginAttemptRepository {
    /// Create a new MySQL login attempt repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginAttemptRepository for MySqlLoginAttemptRepository {
    async fn count_failures_since(
        &self,
        ip: &str,
        since: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS attempt_count
            FROM login_attempts
            WHERE ip = ? AND occurred_at >= ?
        "#;

        let row = sqlx::query(query)
            .bind(ip)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to count login attempts: {}", e),
            })?;

        let count: i64 = row.try_get("attempt_count").map_err(|e| DomainError::Internal {
            message: format!("Failed to get attempt count: {}", e),
        })?;

        Ok(count as u64)
    }

    async fn insert(&self, attempt: FailedLoginAttempt) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO login_attempts (ip, username, occurred_at, locked_until)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&attempt.ip)
            .bind(&attempt.username)
            .bind(attempt.occurred_at)
            .bind(attempt.locked_until)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to insert login attempt: {}", e),
            })?;

        Ok(())
    }

    async fn active_lock_expiry(
        &self,
        ip: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let query = r#"
            SELECT MAX(locked_until) AS lock_expiry
            FROM login_attempts
            WHERE ip = ? AND locked_until > ?
        "#;

        let row = sqlx::query(query)
            .bind(ip)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to read lock state: {}", e),
            })?;

        row.try_get::<Option<DateTime<Utc>>, _>("lock_expiry")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get lock expiry: {}", e),
            })
    }

    async fn clear_for_ip(&self, ip: &str) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM login_attempts WHERE ip = ?")
            .bind(ip)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to clear login attempts: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}
