//! Account registration endpoint (admin only).

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};

use crate::dto::auth_dto::RegisterRequest;
use crate::dto::user_dto::UserResponse;
use crate::handlers::error::{handle_domain_error_with_lang, handle_validation_errors, Language};
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/register
///
/// Creates a new account. Requires an authenticated administrator.
///
/// # Responses
/// - 201 Created: the new account (without the password hash)
/// - 400 Bad Request: invalid request data
/// - 401 Unauthorized: missing or invalid token
/// - 403 Forbidden: caller is not an administrator
/// - 409 Conflict: username already taken
pub async fn register<U, L, P, C>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<U, L, P, C>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    if let Err(error) = context.require_admin() {
        return handle_domain_error_with_lang(error, lang);
    }

    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors, lang);
    }

    match state
        .auth_service
        .register(&request.username, &request.password, request.role)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
