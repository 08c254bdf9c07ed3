//! Patient record DTOs.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use cr_core::domain::entities::patient::{
    DiseaseDiagnosis, Patient, ProgramEnrollment, Sex, TreatmentCourse,
};

/// Request body for creating or updating a patient
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PatientRequest {
    /// Identity document type
    #[validate(length(min = 1, max = 20, message = "id_type must be 1-20 characters"))]
    pub id_type: String,

    /// Identity document number
    #[validate(length(min = 1, max = 30, message = "id_number must be 1-30 characters"))]
    pub id_number: String,

    /// Given names
    #[validate(length(min = 1, max = 100, message = "first_names must be 1-100 characters"))]
    pub first_names: String,

    /// Family names
    #[validate(length(min = 1, max = 100, message = "last_names must be 1-100 characters"))]
    pub last_names: String,

    pub birth_date: Option<NaiveDate>,
    pub sex: Option<Sex>,
    pub department: Option<String>,
    pub city: Option<String>,
    pub housing_id: Option<i64>,
    pub status_id: Option<i64>,
}

impl PatientRequest {
    /// Build the domain entity; `id_number` wins over the body on updates
    pub fn into_patient(self, id_number: Option<&str>) -> Patient {
        Patient {
            id_type: self.id_type,
            id_number: id_number
                .map(|id| id.to_string())
                .unwrap_or(self.id_number),
            first_names: self.first_names,
            last_names: self.last_names,
            birth_date: self.birth_date,
            sex: self.sex,
            department: self.department,
            city: self.city,
            housing_id: self.housing_id,
            status_id: self.status_id,
        }
    }
}

/// Request body for associating a diagnosed disease
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiagnosisRequest {
    pub disease_id: i64,
    pub diagnosed_on: NaiveDate,
    #[validate(length(max = 50, message = "stage must be at most 50 characters"))]
    pub stage: Option<String>,
}

impl From<DiagnosisRequest> for DiseaseDiagnosis {
    fn from(request: DiagnosisRequest) -> Self {
        Self {
            disease_id: request.disease_id,
            disease_name: None,
            diagnosed_on: request.diagnosed_on,
            stage: request.stage,
        }
    }
}

/// Request body for associating a program enrollment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EnrollmentRequest {
    pub program_id: i64,
    pub enrolled_on: NaiveDate,
    #[validate(length(max = 255, message = "notes must be at most 255 characters"))]
    pub notes: Option<String>,
}

impl From<EnrollmentRequest> for ProgramEnrollment {
    fn from(request: EnrollmentRequest) -> Self {
        Self {
            program_id: request.program_id,
            program_name: None,
            enrolled_on: request.enrolled_on,
            notes: request.notes,
        }
    }
}

/// Request body for associating a treatment course
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TreatmentRequest {
    pub treatment_id: i64,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    #[validate(length(max = 255, message = "outcome must be at most 255 characters"))]
    pub outcome: Option<String>,
}

impl From<TreatmentRequest> for TreatmentCourse {
    fn from(request: TreatmentRequest) -> Self {
        Self {
            treatment_id: request.treatment_id,
            treatment_name: None,
            started_on: request.started_on,
            ended_on: request.ended_on,
            outcome: request.outcome,
        }
    }
}
