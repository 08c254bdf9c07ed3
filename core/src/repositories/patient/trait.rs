//! Patient repository trait defining the interface for record persistence.

use async_trait::async_trait;

use crate::domain::entities::patient::{
    DiseaseDiagnosis, Patient, PatientDetail, ProgramEnrollment, TreatmentCourse,
};
use crate::errors::DomainError;

/// Repository trait for Patient entity persistence operations
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// List all patients, ordered by document number
    async fn list(&self) -> Result<Vec<Patient>, DomainError>;

    /// Find a patient by document number
    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Patient>, DomainError>;

    /// Load a patient together with diagnoses, enrollments and treatments,
    /// each joined with its catalog name
    async fn find_detail(&self, id_number: &str) -> Result<Option<PatientDetail>, DomainError>;

    /// Create a new patient record
    async fn create(&self, patient: Patient) -> Result<Patient, DomainError>;

    /// Update an existing patient record, matched by document number
    async fn update(&self, patient: Patient) -> Result<Patient, DomainError>;

    /// Delete a patient and its associations
    ///
    /// # Returns
    /// * `Ok(true)` - Patient was deleted
    /// * `Ok(false)` - Patient not found
    async fn delete(&self, id_number: &str) -> Result<bool, DomainError>;

    /// Record a disease diagnosis for a patient
    async fn add_diagnosis(
        &self,
        id_number: &str,
        diagnosis: DiseaseDiagnosis,
    ) -> Result<(), DomainError>;

    /// Record a program enrollment for a patient
    async fn add_enrollment(
        &self,
        id_number: &str,
        enrollment: ProgramEnrollment,
    ) -> Result<(), DomainError>;

    /// Record a treatment course for a patient
    async fn add_treatment(
        &self,
        id_number: &str,
        course: TreatmentCourse,
    ) -> Result<(), DomainError>;
}
