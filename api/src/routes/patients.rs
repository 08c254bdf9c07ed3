//! Patient record endpoints.
//!
//! All routes here sit behind the JWT middleware; any authenticated account
//! may manage patient records.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};

use crate::dto::patient_dto::{
    DiagnosisRequest, EnrollmentRequest, PatientRequest, TreatmentRequest,
};
use crate::handlers::error::{handle_domain_error_with_lang, handle_validation_errors, Language};
use crate::routes::AppState;

/// Handler for GET /api/v1/patients
pub async fn list_patients<U, L, P, C>(
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

    match state.patient_service.list().await {
        Ok(patients) => HttpResponse::Ok().json(patients),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for GET /api/v1/patients/{id}
///
/// Returns the patient with its diagnoses, program enrollments and treatment
/// courses, each carrying the catalog name.
pub async fn patient_detail<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.patient_service.detail(&path.into_inner()).await {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for POST /api/v1/patients
pub async fn create_patient<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    request: web::Json<PatientRequest>,
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

    match state
        .patient_service
        .create(request.into_inner().into_patient(None))
        .await
    {
        Ok(patient) => HttpResponse::Created().json(patient),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for PUT /api/v1/patients/{id}
pub async fn update_patient<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<String>,
    request: web::Json<PatientRequest>,
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

    let id_number = path.into_inner();
    match state
        .patient_service
        .update(request.into_inner().into_patient(Some(&id_number)))
        .await
    {
        Ok(patient) => HttpResponse::Ok().json(patient),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for DELETE /api/v1/patients/{id}
pub async fn delete_patient<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let lang = Language::from_request(&req);

    match state.patient_service.delete(&path.into_inner()).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for POST /api/v1/patients/{id}/diseases
pub async fn add_diagnosis<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<String>,
    request: web::Json<DiagnosisRequest>,
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

    match state
        .patient_service
        .add_diagnosis(&path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(()) => HttpResponse::Created().finish(),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for POST /api/v1/patients/{id}/programs
pub async fn add_enrollment<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<String>,
    request: web::Json<EnrollmentRequest>,
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

    match state
        .patient_service
        .add_enrollment(&path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(()) => HttpResponse::Created().finish(),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

/// Handler for POST /api/v1/patients/{id}/treatments
pub async fn add_treatment<U, L, P, C>(
    req: HttpRequest,
    state: web::Data<AppState<U, L, P, C>>,
    path: web::Path<String>,
    request: web::Json<TreatmentRequest>,
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

    match state
        .patient_service
        .add_treatment(&path.into_inner(), request.into_inner().into())
        .await
    {
        Ok(()) => HttpResponse::Created().finish(),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
