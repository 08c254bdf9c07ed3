//! Patient record service implementation

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::patient::{
    DiseaseDiagnosis, Patient, PatientDetail, ProgramEnrollment, TreatmentCourse,
};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::PatientRepository;

/// Service managing patient records and their clinical associations
pub struct PatientService<P>
where
    P: PatientRepository,
{
    repository: Arc<P>,
}

impl<P> PatientService<P>
where
    P: PatientRepository,
{
    /// Create a new patient service
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// List all patients
    pub async fn list(&self) -> DomainResult<Vec<Patient>> {
        self.repository.list().await
    }

    /// Load a patient with all clinical associations
    pub async fn detail(&self, id_number: &str) -> DomainResult<PatientDetail> {
        self.repository
            .find_detail(id_number)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "Patient".to_string(),
            })
    }

    /// Register a new patient; document numbers are unique
    pub async fn create(&self, patient: Patient) -> DomainResult<Patient> {
        if self
            .repository
            .find_by_id_number(&patient.id_number)
            .await?
            .is_some()
        {
            return Err(ValidationError::DuplicateValue {
                field: "id_number".to_string(),
            }
            .into());
        }

        let patient = self.repository.create(patient).await?;
        info!(id_number = %patient.id_number, "patient registered");
        Ok(patient)
    }

    /// Update a patient record; the document number identifies the record
    pub async fn update(&self, patient: Patient) -> DomainResult<Patient> {
        if self
            .repository
            .find_by_id_number(&patient.id_number)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            });
        }

        self.repository.update(patient).await
    }

    /// Delete a patient and its associations
    pub async fn delete(&self, id_number: &str) -> DomainResult<()> {
        if !self.repository.delete(id_number).await? {
            return Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            });
        }
        info!(id_number, "patient deleted");
        Ok(())
    }

    /// Record a disease diagnosis
    pub async fn add_diagnosis(
        &self,
        id_number: &str,
        diagnosis: DiseaseDiagnosis,
    ) -> DomainResult<()> {
        self.repository.add_diagnosis(id_number, diagnosis).await
    }

    /// Record a program enrollment
    pub async fn add_enrollment(
        &self,
        id_number: &str,
        enrollment: ProgramEnrollment,
    ) -> DomainResult<()> {
        self.repository.add_enrollment(id_number, enrollment).await
    }

    /// Record a treatment course
    pub async fn add_treatment(
        &self,
        id_number: &str,
        course: TreatmentCourse,
    ) -> DomainResult<()> {
        self.repository.add_treatment(id_number, course).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockPatientRepository;

    fn sample_patient(id_number: &str) -> Patient {
        Patient {
            id_type: "CC".to_string(),
            id_number: id_number.to_string(),
            first_names: "Ana María".to_string(),
            last_names: "Gómez".to_string(),
            birth_date: None,
            sex: None,
            department: None,
            city: None,
            housing_id: None,
            status_id: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_document_number_is_rejected() {
        let service = PatientService::new(Arc::new(MockPatientRepository::new()));

        service.create(sample_patient("1002003004")).await.unwrap();
        let result = service.create(sample_patient("1002003004")).await;

        assert!(matches!(
            result,
            Err(DomainError::ValidationErr(
                ValidationError::DuplicateValue { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_detail_of_unknown_patient_is_not_found() {
        let service = PatientService::new(Arc::new(MockPatientRepository::new()));
        let result = service.detail("does-not-exist").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_requires_existing_patient() {
        let service = PatientService::new(Arc::new(MockPatientRepository::new()));
        let result = service.update(sample_patient("1002003004")).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
