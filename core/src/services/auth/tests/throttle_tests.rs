//! Unit tests for the login throttle

use std::sync::Arc;

use chrono::Duration;

use crate::repositories::MockLoginAttemptRepository;
use crate::services::auth::throttle::{LockStatus, LoginThrottle, ThrottleConfig};

fn throttle_with_repo() -> (LoginThrottle<MockLoginAttemptRepository>, Arc<MockLoginAttemptRepository>) {
    let repository = Arc::new(MockLoginAttemptRepository::new());
    let throttle = LoginThrottle::new(Arc::clone(&repository), ThrottleConfig::default());
    (throttle, repository)
}

#[tokio::test]
async fn test_fresh_address_is_open() {
    let (throttle, _) = throttle_with_repo();
    let status = throttle.check_lock("10.0.0.5").await.unwrap();
    assert_eq!(status, LockStatus::Open);
}

#[tokio::test]
async fn test_two_failures_leave_address_open() {
    let (throttle, _) = throttle_with_repo();

    throttle.record_failure("10.0.0.5", "ana").await;
    throttle.record_failure("10.0.0.5", "ana").await;

    let status = throttle.check_lock("10.0.0.5").await.unwrap();
    assert!(!status.is_locked());
}

#[tokio::test]
async fn test_third_failure_locks_for_two_hours() {
    let (throttle, _) = throttle_with_repo();

    for _ in 0..3 {
        throttle.record_failure("10.0.0.5", "ana").await;
    }

    match throttle.check_lock("10.0.0.5").await.unwrap() {
        LockStatus::Locked {
            retry_after_minutes,
            ..
        } => assert_eq!(retry_after_minutes, 120),
        LockStatus::Open => panic!("expected the third failure to lock the address"),
    }
}

#[tokio::test]
async fn test_remaining_minutes_decrease_and_lock_expires() {
    let (throttle, repository) = throttle_with_repo();

    for _ in 0..3 {
        throttle.record_failure("10.0.0.5", "ana").await;
    }

    // Five minutes later the wait has shrunk accordingly.
    repository.rewind(Duration::minutes(5)).await;
    match throttle.check_lock("10.0.0.5").await.unwrap() {
        LockStatus::Locked {
            retry_after_minutes,
            ..
        } => assert_eq!(retry_after_minutes, 115),
        LockStatus::Open => panic!("lock disappeared after five minutes"),
    }

    // Past the two-hour mark the lock expires lazily, with no unlock write.
    repository.rewind(Duration::minutes(116)).await;
    let status = throttle.check_lock("10.0.0.5").await.unwrap();
    assert_eq!(status, LockStatus::Open);
    // The records are still there; only the expiry comparison changed.
    assert_eq!(repository.stored_count("10.0.0.5").await, 3);
}

#[tokio::test]
async fn test_window_is_rolling_not_cumulative() {
    let (throttle, repository) = throttle_with_repo();

    // Two failures that later age out of the two-hour window.
    throttle.record_failure("10.0.0.5", "ana").await;
    throttle.record_failure("10.0.0.5", "ana").await;
    repository.rewind(Duration::minutes(121)).await;

    // Third overall failure, but the first inside the current window.
    throttle.record_failure("10.0.0.5", "ana").await;

    let status = throttle.check_lock("10.0.0.5").await.unwrap();
    assert!(!status.is_locked());
}

#[tokio::test]
async fn test_lock_expiry_counts_from_third_failure() {
    let (throttle, repository) = throttle_with_repo();

    // Two early failures, then the third 30 minutes later: the lock must
    // run two hours from the third failure, not from the first.
    throttle.record_failure("10.0.0.5", "ana").await;
    throttle.record_failure("10.0.0.5", "ana").await;
    repository.rewind(Duration::minutes(30)).await;
    throttle.record_failure("10.0.0.5", "ana").await;

    match throttle.check_lock("10.0.0.5").await.unwrap() {
        LockStatus::Locked {
            retry_after_minutes,
            ..
        } => assert_eq!(retry_after_minutes, 120),
        LockStatus::Open => panic!("expected a lock"),
    }
}

#[tokio::test]
async fn test_addresses_do_not_influence_each_other() {
    let (throttle, _) = throttle_with_repo();

    for _ in 0..3 {
        throttle.record_failure("10.0.0.5", "ana").await;
    }
    throttle.record_failure("10.0.0.6", "luis").await;

    assert!(throttle.check_lock("10.0.0.5").await.unwrap().is_locked());
    assert!(!throttle.check_lock("10.0.0.6").await.unwrap().is_locked());
}

#[tokio::test]
async fn test_clear_attempts_unlocks_immediately() {
    let (throttle, repository) = throttle_with_repo();

    for _ in 0..5 {
        throttle.record_failure("10.0.0.5", "ana").await;
    }
    assert!(throttle.check_lock("10.0.0.5").await.unwrap().is_locked());

    throttle.clear_attempts("10.0.0.5").await;

    let status = throttle.check_lock("10.0.0.5").await.unwrap();
    assert_eq!(status, LockStatus::Open);
    assert_eq!(repository.stored_count("10.0.0.5").await, 0);
}

#[tokio::test]
async fn test_record_failure_swallows_storage_errors() {
    let (throttle, repository) = throttle_with_repo();

    repository.fail_next_ops(true).await;
    // Must not panic or propagate; the login response owes nothing to
    // bookkeeping.
    throttle.record_failure("10.0.0.5", "ana").await;
    throttle.clear_attempts("10.0.0.5").await;

    repository.fail_next_ops(false).await;
    assert_eq!(repository.stored_count("10.0.0.5").await, 0);
}

#[tokio::test]
async fn test_check_lock_surfaces_storage_errors() {
    let (throttle, repository) = throttle_with_repo();

    repository.fail_next_ops(true).await;
    let result = throttle.check_lock("10.0.0.5").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_full_lockout_scenario() {
    let (throttle, repository) = throttle_with_repo();
    let ip = "10.0.0.5";

    // Three failures within a minute.
    for _ in 0..3 {
        throttle.record_failure(ip, "ana").await;
    }
    match throttle.check_lock(ip).await.unwrap() {
        LockStatus::Locked {
            retry_after_minutes,
            ..
        } => assert!((119..=120).contains(&retry_after_minutes)),
        LockStatus::Open => panic!("expected a lock after the third failure"),
    }

    // Five minutes later: still locked, wait shrunk to about 115 minutes.
    repository.rewind(Duration::minutes(5)).await;
    match throttle.check_lock(ip).await.unwrap() {
        LockStatus::Locked {
            retry_after_minutes,
            ..
        } => assert!((114..=115).contains(&retry_after_minutes)),
        LockStatus::Open => panic!("lock should still be active"),
    }

    // Two hours after the failures the address is open again.
    repository.rewind(Duration::minutes(116)).await;
    assert_eq!(throttle.check_lock(ip).await.unwrap(), LockStatus::Open);
}
