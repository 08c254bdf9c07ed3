//! Repository interfaces for the domain layer.
//!
//! Each repository is a trait implemented by the infrastructure layer for the
//! real database and by an in-memory mock for unit tests.

pub mod catalog;
pub mod login_attempt;
pub mod patient;
pub mod user;

pub use catalog::{CatalogRepository, MockCatalogRepository};
pub use login_attempt::{LoginAttemptRepository, MockLoginAttemptRepository};
pub use patient::{MockPatientRepository, PatientRepository};
pub use user::{MockUserRepository, UserRepository};
