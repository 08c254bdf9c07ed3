//! Domain entities for the CareRecord system.

pub mod catalog;
pub mod login_attempt;
pub mod patient;
pub mod token;
pub mod user;

pub use catalog::{Disease, HealthProgram, HousingUnit, PatientStatus, Treatment};
pub use login_attempt::FailedLoginAttempt;
pub use patient::{
    DiseaseDiagnosis, Patient, PatientDetail, ProgramEnrollment, Sex, TreatmentCourse,
};
pub use token::Claims;
pub use user::{User, UserRole};
