//! End-to-end tests of the HTTP layer against in-memory repositories.
//!
//! These drive the full actix application: routing, middleware, DTO
//! validation, the login throttle and the bilingual error mapping.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use cr_api::app::create_app;
use cr_api::routes::AppState;
use cr_core::domain::entities::catalog::Disease;
use cr_core::domain::entities::user::{User, UserRole};
use cr_core::repositories::{
    MockCatalogRepository, MockLoginAttemptRepository, MockPatientRepository, MockUserRepository,
};
use cr_core::services::auth::{
    hash_password, AuthService, AuthServiceConfig, LoginThrottle, ThrottleConfig,
};
use cr_core::services::patient::PatientService;
use cr_core::services::token::TokenService;
use cr_shared::config::JwtConfig;

type TestState = AppState<
    MockUserRepository,
    MockLoginAttemptRepository,
    MockPatientRepository,
    MockCatalogRepository,
>;

async fn test_state() -> web::Data<TestState> {
    let users = Arc::new(MockUserRepository::new());
    let attempts = Arc::new(MockLoginAttemptRepository::new());
    let patients = Arc::new(MockPatientRepository::new());
    let catalogs = Arc::new(MockCatalogRepository::new());

    let admin_hash = hash_password("admin-password", 4).unwrap();
    users
        .seed(User::new("admin".to_string(), admin_hash, UserRole::Admin))
        .await;
    let clerk_hash = hash_password("clerk-password", 4).unwrap();
    users
        .seed(User::new("clerk".to_string(), clerk_hash, UserRole::User))
        .await;

    let token_service = Arc::new(TokenService::new(JwtConfig::new("api-test-secret")));
    let throttle = Arc::new(LoginThrottle::new(
        Arc::clone(&attempts),
        ThrottleConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        users,
        throttle,
        token_service.clone(),
        AuthServiceConfig::for_tests(),
    ));
    let patient_service = Arc::new(PatientService::new(patients));

    web::Data::new(AppState {
        auth_service,
        patient_service,
        catalog_repository: catalogs,
        token_service,
    })
}

fn login_body(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

/// Log in against a fresh app over the shared state and return the token.
///
/// Tokens are signed with the state's secret, so they stay valid across app
/// instances built from the same state.
async fn obtain_token(state: web::Data<TestState>, username: &str, password: &str) -> String {
    let app = test::init_service(create_app(state)).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(login_body(username, password))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn test_login_success_returns_bearer_token() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(login_body("admin", "admin-password"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["token"].as_str().unwrap().contains('.'));
}

#[actix_rt::test]
async fn test_wrong_password_and_unknown_user_get_the_same_401() {
    let app = test::init_service(create_app(test_state().await)).await;

    let wrong_pw = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(login_body("admin", "nope"))
        .to_request();
    let resp = test::call_service(&app, wrong_pw).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body: Value = test::read_body_json(resp).await;

    let unknown = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "192.0.2.7"))
        .set_json(login_body("nobody", "nope"))
        .to_request();
    let resp = test::call_service(&app, unknown).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let unknown_body: Value = test::read_body_json(resp).await;

    assert_eq!(wrong_pw_body["error"], unknown_body["error"]);
    assert_eq!(wrong_pw_body["message"], unknown_body["message"]);
}

#[actix_rt::test]
async fn test_third_failure_locks_the_address() {
    let app = test::init_service(create_app(test_state().await)).await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.0.0.5"))
            .set_json(login_body("admin", "nope"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    let third = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.5"))
        .set_json(login_body("admin", "nope"))
        .to_request();
    let resp = test::call_service(&app, third).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("120 minutes"));

    // Even the correct password is refused while the lock is active.
    let fourth = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.5"))
        .set_json(login_body("admin", "admin-password"))
        .to_request();
    let resp = test::call_service(&app, fourth).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different address is unaffected.
    let other = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.99"))
        .set_json(login_body("admin", "admin-password"))
        .to_request();
    let resp = test::call_service(&app, other).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_lockout_message_is_spanish_when_requested() {
    let app = test::init_service(create_app(test_state().await)).await;

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "10.0.0.5"))
            .insert_header(("Accept-Language", "es-CO,es;q=0.9"))
            .set_json(login_body("admin", "nope"))
            .to_request();
        let _ = test::call_service(&app, req).await;
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header(("X-Forwarded-For", "10.0.0.5"))
        .insert_header(("Accept-Language", "es-CO,es;q=0.9"))
        .set_json(login_body("admin", "nope"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Demasiados intentos"));
}

#[actix_rt::test]
async fn test_login_validation_rejects_empty_fields() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(login_body("", "pw"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_protected_routes_require_a_token() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::get().uri("/api/v1/patients").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/patients")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_registration_is_admin_only() {
    let state = test_state().await;
    let app = test::init_service(create_app(state.clone())).await;

    let clerk_token = obtain_token(state.clone(), "clerk", "clerk-password").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("Authorization", format!("Bearer {}", clerk_token)))
        .set_json(json!({
            "username": "newuser",
            "password": "a-long-password",
            "role": "user"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let admin_token = obtain_token(state, "admin", "admin-password").await;
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .set_json(json!({
            "username": "newuser",
            "password": "a-long-password",
            "role": "user"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "newuser");
    assert!(body.get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_user_management_is_admin_only() {
    let state = test_state().await;
    let app = test::init_service(create_app(state.clone())).await;

    let clerk_token = obtain_token(state.clone(), "clerk", "clerk-password").await;
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", clerk_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let admin_token = obtain_token(state, "admin", "admin-password").await;
    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", admin_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn test_patient_crud_round_trip() {
    let state = test_state().await;
    let app = test::init_service(create_app(state.clone())).await;
    let token = obtain_token(state, "clerk", "clerk-password").await;
    let auth = ("Authorization", format!("Bearer {}", token));

    let patient = json!({
        "id_type": "CC",
        "id_number": "1002003004",
        "first_names": "Ana María",
        "last_names": "Gómez",
        "sex": "F",
        "department": "Antioquia",
        "city": "Medellín"
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/patients")
        .insert_header(auth.clone())
        .set_json(patient.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Duplicate document number is rejected.
    let req = test::TestRequest::post()
        .uri("/api/v1/patients")
        .insert_header(auth.clone())
        .set_json(patient)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Associate a diagnosis, then read the detail view.
    let req = test::TestRequest::post()
        .uri("/api/v1/patients/1002003004/diseases")
        .insert_header(auth.clone())
        .set_json(json!({
            "disease_id": 3,
            "diagnosed_on": "2025-04-01",
            "stage": "II"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/v1/patients/1002003004")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["patient"]["first_names"], "Ana María");
    assert_eq!(body["diseases"][0]["disease_id"], 3);

    let req = test::TestRequest::delete()
        .uri("/api/v1/patients/1002003004")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/v1/patients/1002003004")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_catalogs_are_public() {
    let state = test_state().await;
    state
        .catalog_repository
        .seed_diseases(vec![Disease {
            id: 1,
            name: "Dengue".to_string(),
        }])
        .await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/catalogs/diseases")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body[0]["name"], "Dengue");
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
