//! MySQL repository implementations.

mod catalog_repository_impl;
mod login_attempt_repository_impl;
mod patient_repository_impl;
mod user_repository_impl;

pub use catalog_repository_impl::MySqlCatalogRepository;
pub use login_attempt_repository_impl::MySqlLoginAttemptRepository;
pub use patient_repository_impl::MySqlPatientRepository;
pub use user_repository_impl::MySqlUserRepository;
