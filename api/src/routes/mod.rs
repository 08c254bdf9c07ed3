//! Route handlers.

pub mod auth;
pub mod catalogs;
pub mod patients;
pub mod users;

use std::sync::Arc;

use cr_core::repositories::{
    CatalogRepository, LoginAttemptRepository, PatientRepository, UserRepository,
};
use cr_core::services::auth::AuthService;
use cr_core::services::patient::PatientService;
use cr_core::services::token::TokenService;

/// Application state that holds the shared services
pub struct AppState<U, L, P, C>
where
    U: UserRepository,
    L: LoginAttemptRepository,
    P: PatientRepository,
    C: CatalogRepository,
{
    pub auth_service: Arc<AuthService<U, L>>,
    pub patient_service: Arc<PatientService<P>>,
    pub catalog_repository: Arc<C>,
    pub token_service: Arc<TokenService>,
}
