//! Mock implementation of PatientRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::patient::{
    DiseaseDiagnosis, Patient, PatientDetail, ProgramEnrollment, TreatmentCourse,
};
use crate::errors::DomainError;

use super::trait_::PatientRepository;

#[derive(Clone)]
struct PatientRecord {
    patient: Patient,
    diseases: Vec<DiseaseDiagnosis>,
    programs: Vec<ProgramEnrollment>,
    treatments: Vec<TreatmentCourse>,
}

impl PatientRecord {
    fn new(patient: Patient) -> Self {
        Self {
            patient,
            diseases: Vec::new(),
            programs: Vec::new(),
            treatments: Vec::new(),
        }
    }
}

/// Mock patient repository for testing
pub struct MockPatientRepository {
    records: Arc<RwLock<HashMap<String, PatientRecord>>>,
}

impl MockPatientRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockPatientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientRepository for MockPatientRepository {
    async fn list(&self) -> Result<Vec<Patient>, DomainError> {
        let records = self.records.read().await;
        let mut all: Vec<Patient> = records.values().map(|r| r.patient.clone()).collect();
        all.sort_by(|a, b| a.id_number.cmp(&b.id_number));
        Ok(all)
    }

    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Patient>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(id_number).map(|r| r.patient.clone()))
    }

    async fn find_detail(&self, id_number: &str) -> Result<Option<PatientDetail>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(id_number).map(|r| PatientDetail {
            patient: r.patient.clone(),
            diseases: r.diseases.clone(),
            programs: r.programs.clone(),
            treatments: r.treatments.clone(),
        }))
    }

    async fn create(&self, patient: Patient) -> Result<Patient, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&patient.id_number) {
            return Err(DomainError::Validation {
                message: "Document number already registered".to_string(),
            });
        }

        records.insert(patient.id_number.clone(), PatientRecord::new(patient.clone()));
        Ok(patient)
    }

    async fn update(&self, patient: Patient) -> Result<Patient, DomainError> {
        let mut records = self.records.write().await;

        match records.get_mut(&patient.id_number) {
            Some(record) => {
                record.patient = patient.clone();
                Ok(patient)
            }
            None => Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            }),
        }
    }

    async fn delete(&self, id_number: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(id_number).is_some())
    }

    async fn add_diagnosis(
        &self,
        id_number: &str,
        diagnosis: DiseaseDiagnosis,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(id_number) {
            Some(record) => {
                record.diseases.push(diagnosis);
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            }),
        }
    }

    async fn add_enrollment(
        &self,
        id_number: &str,
        enrollment: ProgramEnrollment,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(id_number) {
            Some(record) => {
                record.programs.push(enrollment);
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            }),
        }
    }

    async fn add_treatment(
        &self,
        id_number: &str,
        course: TreatmentCourse,
    ) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(id_number) {
            Some(record) => {
                record.treatments.push(course);
                Ok(())
            }
            None => Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            }),
        }
    }
}
