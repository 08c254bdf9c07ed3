//! Unit tests for the authentication service login flow

use std::sync::Arc;

use chrono::Duration;

use cr_shared::config::JwtConfig;

use crate::domain::entities::user::{User, UserRole};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{MockLoginAttemptRepository, MockUserRepository, UserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig, LoginThrottle, ThrottleConfig};
use crate::services::auth::password::hash_password;
use crate::services::token::TokenService;

struct Fixture {
    service: AuthService<MockUserRepository, MockLoginAttemptRepository>,
    users: Arc<MockUserRepository>,
    attempts: Arc<MockLoginAttemptRepository>,
}

async fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let attempts = Arc::new(MockLoginAttemptRepository::new());

    let throttle = Arc::new(LoginThrottle::new(
        Arc::clone(&attempts),
        ThrottleConfig::default(),
    ));
    let token_service = Arc::new(TokenService::new(JwtConfig::new("service-test-secret")));

    let service = AuthService::new(
        Arc::clone(&users),
        throttle,
        token_service,
        AuthServiceConfig::for_tests(),
    );

    let hash = hash_password("correct-horse", 4).unwrap();
    users
        .seed(User::new("ana".to_string(), hash, UserRole::User))
        .await;

    Fixture {
        service,
        users,
        attempts,
    }
}

#[tokio::test]
async fn test_successful_login_issues_bearer_token() {
    let fx = fixture().await;

    let response = fx
        .service
        .login("ana", "correct-horse", "10.0.0.5")
        .await
        .unwrap();

    assert_eq!(response.token_type, "Bearer");
    assert!(!response.access_token.is_empty());
}

#[tokio::test]
async fn test_wrong_password_is_generic_and_recorded() {
    let fx = fixture().await;

    let result = fx.service.login("ana", "wrong", "10.0.0.5").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert_eq!(fx.attempts.stored_count("10.0.0.5").await, 1);
}

#[tokio::test]
async fn test_unknown_username_gets_the_same_error() {
    let fx = fixture().await;

    let unknown = fx.service.login("nadie", "whatever", "10.0.0.5").await;
    let wrong_pw = fx.service.login("ana", "wrong", "10.0.0.6").await;

    let unknown_msg = unknown.unwrap_err().to_string();
    let wrong_pw_msg = wrong_pw.unwrap_err().to_string();
    assert_eq!(unknown_msg, wrong_pw_msg);
    // The attempt is recorded under the submitted username even when no such
    // account exists.
    assert_eq!(fx.attempts.stored_count("10.0.0.5").await, 1);
}

#[tokio::test]
async fn test_third_failure_answers_with_lockout() {
    let fx = fixture().await;

    for _ in 0..2 {
        let result = fx.service.login("ana", "wrong", "10.0.0.5").await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::InvalidCredentials))
        ));
    }

    let third = fx.service.login("ana", "wrong", "10.0.0.5").await;
    match third {
        Err(DomainError::Auth(AuthError::TooManyFailedLogins { minutes })) => {
            assert_eq!(minutes, 120)
        }
        other => panic!("expected lockout on the third failure, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_locked_address_skips_credential_check_and_records_nothing() {
    let fx = fixture().await;

    for _ in 0..3 {
        let _ = fx.service.login("ana", "wrong", "10.0.0.5").await;
    }
    assert_eq!(fx.attempts.stored_count("10.0.0.5").await, 3);

    // Even the correct password is rejected while the lock is active, and no
    // further record is written, so the lock cannot extend itself.
    fx.attempts.rewind(Duration::minutes(5)).await;
    let result = fx.service.login("ana", "correct-horse", "10.0.0.5").await;
    match result {
        Err(DomainError::Auth(AuthError::TooManyFailedLogins { minutes })) => {
            assert_eq!(minutes, 115)
        }
        other => panic!("expected lockout, got {:?}", other.err()),
    }
    assert_eq!(fx.attempts.stored_count("10.0.0.5").await, 3);
}

#[tokio::test]
async fn test_lock_expires_and_success_clears_history() {
    let fx = fixture().await;

    for _ in 0..3 {
        let _ = fx.service.login("ana", "wrong", "10.0.0.5").await;
    }

    // Two hours later the lock has lapsed; a correct password logs in and
    // wipes the address history.
    fx.attempts.rewind(Duration::minutes(121)).await;
    let response = fx.service.login("ana", "correct-horse", "10.0.0.5").await;
    assert!(response.is_ok());
    assert_eq!(fx.attempts.stored_count("10.0.0.5").await, 0);
}

#[tokio::test]
async fn test_lock_check_failure_is_surfaced_not_bypassed() {
    let fx = fixture().await;

    fx.attempts.fail_next_ops(true).await;
    let result = fx.service.login("ana", "correct-horse", "10.0.0.5").await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_register_rejects_duplicate_username() {
    let fx = fixture().await;

    let result = fx.service.register("ana", "pw", UserRole::User).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_register_and_login_round_trip() {
    let fx = fixture().await;

    let user = fx
        .service
        .register("luis", "otra-clave", UserRole::Admin)
        .await
        .unwrap();
    assert!(user.id > 0);
    assert!(user.is_admin());

    let response = fx.service.login("luis", "otra-clave", "10.0.0.9").await;
    assert!(response.is_ok());
}

#[tokio::test]
async fn test_update_user_changes_password() {
    let fx = fixture().await;
    let ana = fx.users.find_by_username("ana").await.unwrap().unwrap();

    fx.service
        .update_user(ana.id, "ana", Some("nueva-clave"), UserRole::Admin)
        .await
        .unwrap();

    assert!(fx.service.login("ana", "correct-horse", "10.1.1.1").await.is_err());
    assert!(fx.service.login("ana", "nueva-clave", "10.1.1.2").await.is_ok());
}

#[tokio::test]
async fn test_delete_unknown_user_is_not_found() {
    let fx = fixture().await;

    let result = fx.service.delete_user(9999).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}
