//! Patient entity and its clinical association records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex as recorded on the identity document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Parse from the stored single-letter form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Stored single-letter form
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// Patient entity, keyed by identity document number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Identity document type (e.g. national id, passport)
    pub id_type: String,

    /// Identity document number; primary key, immutable after creation
    pub id_number: String,

    /// Given names
    pub first_names: String,

    /// Family names
    pub last_names: String,

    /// Date of birth
    pub birth_date: Option<NaiveDate>,

    /// Recorded sex
    pub sex: Option<Sex>,

    /// Department (first-level administrative division)
    pub department: Option<String>,

    /// City of residence
    pub city: Option<String>,

    /// Reference to the housing catalog entry
    pub housing_id: Option<i64>,

    /// Reference to the patient status catalog entry
    pub status_id: Option<i64>,
}

/// A disease diagnosed for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseaseDiagnosis {
    /// Reference to the disease catalog entry
    pub disease_id: i64,

    /// Catalog name, filled in when reading the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disease_name: Option<String>,

    /// Date the diagnosis was made
    pub diagnosed_on: NaiveDate,

    /// Clinical stage at diagnosis, free text
    pub stage: Option<String>,
}

/// A patient's enrollment in a health program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEnrollment {
    /// Reference to the program catalog entry
    pub program_id: i64,

    /// Catalog name, filled in when reading the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,

    /// Date the patient joined the program
    pub enrolled_on: NaiveDate,

    /// Free-text notes
    pub notes: Option<String>,
}

/// A treatment course applied to a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentCourse {
    /// Reference to the treatment catalog entry
    pub treatment_id: i64,

    /// Catalog name, filled in when reading the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_name: Option<String>,

    /// Date the course started
    pub started_on: NaiveDate,

    /// Date the course ended, if finished
    pub ended_on: Option<NaiveDate>,

    /// Recorded outcome, free text
    pub outcome: Option<String>,
}

/// Full detail view of a patient with all clinical associations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientDetail {
    pub patient: Patient,
    pub diseases: Vec<DiseaseDiagnosis>,
    pub programs: Vec<ProgramEnrollment>,
    pub treatments: Vec<TreatmentCourse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_round_trip() {
        assert_eq!(Sex::parse("M"), Some(Sex::Male));
        assert_eq!(Sex::parse("F"), Some(Sex::Female));
        assert_eq!(Sex::parse("X"), None);
        assert_eq!(Sex::Female.as_str(), "F");
    }

    #[test]
    fn test_sex_serializes_as_single_letter() {
        let json = serde_json::to_string(&Sex::Male).unwrap();
        assert_eq!(json, "\"M\"");
    }
}
