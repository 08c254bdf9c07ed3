//! Reference catalog endpoints.
//!
//! Public: the login form loads these before any authentication happens.

use actix_web::{web, HttpRequest, HttpResponse};

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};

use crate::handlers::error::{handle_domain_error_with_lang, Language};
use crate::routes::AppState;

/// Handler for GET /api/v1/catalogs/housing
pub async fn housing_units<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.catalog_repository.housing_units().await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for GET /api/v1/catalogs/statuses
pub async fn patient_statuses<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.catalog_repository.patient_statuses().await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for GET /api/v1/catalogs/diseases
pub async fn diseases<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.catalog_repository.diseases().await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for GET /api/v1/catalogs/programs
pub async fn health_programs<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.catalog_repository.health_programs().await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for GET /api/v1/catalogs/treatments
pub async fn treatments<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.catalog_repository.treatments().await {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
