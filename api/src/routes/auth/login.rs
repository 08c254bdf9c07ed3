//! Login endpoint.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error_with_lang, handle_validation_errors, Language};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Authenticates a username/password pair. The login throttle runs first: a
/// client address with an active lock is answered with 429 and the remaining
/// wait in whole minutes, without the password being compared. A failed
/// credential check is answered with a single generic message that does not
/// reveal whether the username or the password was wrong.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "mrodriguez",
///     "password": "secret"
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{ "token": "...", "token_type": "Bearer", "expires_in": 28800 }`
/// - 400 Bad Request: invalid request data
/// - 401 Unauthorized: incorrect username or password
/// - 429 Too Many Requests: address locked, message carries remaining minutes
/// - 500 Internal Server Error: lock state could not be read, or other failure
pub async fn login<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors, lang);
    }

    let client_ip = extract_client_ip(&req);

    log::info!(
        "Processing login request for user: {}, ip: {}",
        request.username,
        client_ip
    );

    match state
        .auth_service
        .login(&request.username, &request.password, &client_ip)
        .await
    {
        Ok(auth_response) => HttpResponse::Ok().json(LoginResponse::from(auth_response)),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Extract the client IP address from the request
///
/// Honors reverse-proxy headers before falling back to the peer address.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            // Take the first IP from the comma-separated list
            if let Some(ip) = forwarded_str.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "10.0.0.5, 172.16.0.1"))
            .insert_header(("X-Real-IP", "172.16.0.9"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "10.0.0.5");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip() {
        let req = TestRequest::default()
            .insert_header(("X-Real-IP", "172.16.0.9"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "172.16.0.9");
    }

    #[test]
    fn test_login_request_validation() {
        let request = LoginRequest {
            username: "".to_string(),
            password: "pw".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
