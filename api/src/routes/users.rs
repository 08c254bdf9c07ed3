//! Account management endpoints (admin only).

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};

use crate::dto::user_dto::{UpdateUserRequest, UserResponse};
use crate::handlers::error::{handle_domain_error_with_lang, handle_validation_errors, Language};
use crate::middleware::AuthContext;
use crate::routes::AppState;

/// Handler for GET /api/v1/users
pub async fn list_users<U, L, P, C>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<U, L, P, C>>,
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

    match state.auth_service.list_users().await {
        Ok(users) => HttpResponse::Ok().json(
            users
                .into_iter()
                .map(UserResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for PUT /api/v1/users/{id}
pub async fn update_user<U, L, P, C>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
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

    let id = path.into_inner();
    match state
        .auth_service
        .update_user(id, &request.username, request.password.as_deref(), request.role)
        .await
    {
        Ok(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for DELETE /api/v1/users/{id}
pub async fn delete_user<U, L, P, C>(
    req: HttpRequest,
    context: AuthContext,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<i64>,
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

    match state.auth_service.delete_user(path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
