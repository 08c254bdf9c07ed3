use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};

use cr_api::app::create_app;
use cr_api::routes::AppState;
use cr_core::services::auth::{AuthService, AuthServiceConfig, LoginThrottle, ThrottleConfig};
use cr_core::services::patient::PatientService;
use cr_core::services::token::TokenService;
use cr_infra::database::{
    create_pool, MySqlCatalogRepository, MySqlLoginAttemptRepository, MySqlPatientRepository,
    MySqlUserRepository,
};
use cr_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting CareRecord API Server");

    // Load configuration
    let config = AppConfig::from_env();
    if config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; using the development default");
    }

    // Database connection pool
    let pool = create_pool(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    // Repository implementations
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let attempt_repository = Arc::new(MySqlLoginAttemptRepository::new(pool.clone()));
    let patient_repository = Arc::new(MySqlPatientRepository::new(pool.clone()));
    let catalog_repository = Arc::new(MySqlCatalogRepository::new(pool));

    // Services
    let token_service = Arc::new(TokenService::new(config.jwt.clone()));
    let throttle = Arc::new(LoginThrottle::new(
        attempt_repository,
        ThrottleConfig::default(),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        throttle,
        token_service.clone(),
        AuthServiceConfig::default(),
    ));
    let patient_service = Arc::new(PatientService::new(patient_repository));

    let app_state = web::Data::new(AppState {
        auth_service,
        patient_service,
        catalog_repository,
        token_service,
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
