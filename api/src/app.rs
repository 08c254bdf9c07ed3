//! Application factory
//!
//! This module provides the factory for creating the Actix-web application
//! with all routes and middleware wired up.

use actix_web::body::MessageBody;
use actix_web::{middleware::Logger, web, App, HttpResponse};

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};

use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, catalogs, patients, users, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, L, P, C>(
    app_state: web::Data<AppState<U, L, P, C>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    L: LoginAttemptRepository + 'static,
    P: PatientRepository + 'static,
    C: CatalogRepository + 'static,
{
    let cors = create_cors();
    let jwt = JwtAuth::new(app_state.token_service.clone());

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware (order matters: CORS first, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Auth routes; login is public, registration is admin-only
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login::<U, L, P, C>))
                        .route(
                            "/register",
                            web::post()
                                .to(auth::register::<U, L, P, C>)
                                .wrap(jwt.clone()),
                        ),
                )
                // Account management (admin checks inside the handlers)
                .service(
                    web::scope("/users")
                        .wrap(jwt.clone())
                        .route("", web::get().to(users::list_users::<U, L, P, C>))
                        .route("/{id}", web::put().to(users::update_user::<U, L, P, C>))
                        .route("/{id}", web::delete().to(users::delete_user::<U, L, P, C>)),
                )
                // Patient records
                .service(
                    web::scope("/patients")
                        .wrap(jwt)
                        .route("", web::get().to(patients::list_patients::<U, L, P, C>))
                        .route("", web::post().to(patients::create_patient::<U, L, P, C>))
                        .route("/{id}", web::get().to(patients::patient_detail::<U, L, P, C>))
                        .route("/{id}", web::put().to(patients::update_patient::<U, L, P, C>))
                        .route(
                            "/{id}",
                            web::delete().to(patients::delete_patient::<U, L, P, C>),
                        )
                        .route(
                            "/{id}/diseases",
                            web::post().to(patients::add_diagnosis::<U, L, P, C>),
                        )
                        .route(
                            "/{id}/programs",
                            web::post().to(patients::add_enrollment::<U, L, P, C>),
                        )
                        .route(
                            "/{id}/treatments",
                            web::post().to(patients::add_treatment::<U, L, P, C>),
                        ),
                )
                // Reference catalogs, loaded by the frontend before login
                .service(
                    web::scope("/catalogs")
                        .route("/housing", web::get().to(catalogs::housing_units::<U, L, P, C>))
                        .route(
                            "/statuses",
                            web::get().to(catalogs::patient_statuses::<U, L, P, C>),
                        )
                        .route("/diseases", web::get().to(catalogs::diseases::<U, L, P, C>))
                        .route(
                            "/programs",
                            web::get().to(catalogs::health_programs::<U, L, P, C>),
                        )
                        .route(
                            "/treatments",
                            web::get().to(catalogs::treatments::<U, L, P, C>),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "carerecord-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
