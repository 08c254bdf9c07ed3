//! MySQL implementation of the PatientRepository trait.
//!
//! Patients live in the `patients` table keyed by document number; the three
//! association tables (`patient_diseases`, `patient_programs`,
//! `patient_treatments`) cascade on patient deletion. The detail view joins
//! each association with its catalog to carry the display name.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySqlPool, Row};

use cr_core::domain::entities::patient::{
    DiseaseDiagnosis, Patient, PatientDetail, ProgramEnrollment, Sex, TreatmentCourse,
};
use cr_core::errors::DomainError;
use cr_core::repositories::PatientRepository;

/// MySQL implementation of PatientRepository
pub struct MySqlPatientRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPatientRepository {
    /// Create a new MySQL patient repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Patient entity
    fn row_to_patient(row: &sqlx::mysql::MySqlRow) -> Result<Patient, DomainError> {
        let sex: Option<String> = row.try_get("sex").map_err(|e| DomainError::Internal {
            message: format!("Failed to get sex: {}", e),
        })?;

        Ok(Patient {
            id_type: row.try_get("id_type").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id_type: {}", e),
            })?,
            id_number: row
                .try_get("id_number")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get id_number: {}", e),
                })?,
            first_names: row
                .try_get("first_names")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get first_names: {}", e),
                })?,
            last_names: row
                .try_get("last_names")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_names: {}", e),
                })?,
            birth_date: row
                .try_get::<Option<NaiveDate>, _>("birth_date")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get birth_date: {}", e),
                })?,
            sex: sex.as_deref().and_then(Sex::parse),
            department: row
                .try_get("department")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get department: {}", e),
                })?,
            city: row.try_get("city").map_err(|e| DomainError::Internal {
                message: format!("Failed to get city: {}", e),
            })?,
            housing_id: row
                .try_get("housing_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get housing_id: {}", e),
                })?,
            status_id: row
                .try_get("status_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get status_id: {}", e),
                })?,
        })
    }

    async fn load_diseases(&self, id_number: &str) -> Result<Vec<DiseaseDiagnosis>, DomainError> {
        let query = r#"
            SELECT pd.disease_id, d.name AS disease_name, pd.diagnosed_on, pd.stage
            FROM patient_diseases pd
            JOIN diseases d ON d.id = pd.disease_id
            WHERE pd.patient_id = ?
            ORDER BY pd.diagnosed_on
        "#;

        let rows = sqlx::query(query)
            .bind(id_number)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load diagnoses: {}", e),
            })?;

        let mut diseases = Vec::with_capacity(rows.len());
        for row in rows {
            diseases.push(DiseaseDiagnosis {
                disease_id: row.try_get("disease_id").map_err(internal)?,
                disease_name: row.try_get("disease_name").map_err(internal)?,
                diagnosed_on: row.try_get("diagnosed_on").map_err(internal)?,
                stage: row.try_get("stage").map_err(internal)?,
            });
        }
        Ok(diseases)
    }

    async fn load_programs(&self, id_number: &str) -> Result<Vec<ProgramEnrollment>, DomainError> {
        let query = r#"
            SELECT pp.program_id, hp.name AS program_name, pp.enrolled_on, pp.notes
            FROM patient_programs pp
            JOIN health_programs hp ON hp.id = pp.program_id
            WHERE pp.patient_id = ?
            ORDER BY pp.enrolled_on
        "#;

        let rows = sqlx::query(query)
            .bind(id_number)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load enrollments: {}", e),
            })?;

        let mut programs = Vec::with_capacity(rows.len());
        for row in rows {
            programs.push(ProgramEnrollment {
                program_id: row.try_get("program_id").map_err(internal)?,
                program_name: row.try_get("program_name").map_err(internal)?,
                enrolled_on: row.try_get("enrolled_on").map_err(internal)?,
                notes: row.try_get("notes").map_err(internal)?,
            });
        }
        Ok(programs)
    }

    async fn load_treatments(&self, id_number: &str) -> Result<Vec<TreatmentCourse>, DomainError> {
        let query = r#"
            SELECT pt.treatment_id, t.name AS treatment_name,
                   pt.started_on, pt.ended_on, pt.outcome
            FROM patient_treatments pt
            JOIN treatments t ON t.id = pt.treatment_id
            WHERE pt.patient_id = ?
            ORDER BY pt.started_on
        "#;

        let rows = sqlx::query(query)
            .bind(id_number)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load treatments: {}", e),
            })?;

        let mut treatments = Vec::with_capacity(rows.len());
        for row in rows {
            treatments.push(TreatmentCourse {
                treatment_id: row.try_get("treatment_id").map_err(internal)?,
                treatment_name: row.try_get("treatment_name").map_err(internal)?,
                started_on: row.try_get("started_on").map_err(internal)?,
                ended_on: row.try_get("ended_on").map_err(internal)?,
                outcome: row.try_get("outcome").map_err(internal)?,
            });
        }
        Ok(treatments)
    }
}

fn internal(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column: {}", e),
    }
}

const PATIENT_COLUMNS: &str =
    "id_type, id_number, first_names, last_names, birth_date, sex, department, city, housing_id, status_id";

#[async_trait]
impl PatientRepository for MySqlPatientRepository {
    async fn list(&self) -> Result<Vec<Patient>, DomainError> {
        let query = format!("SELECT {} FROM patients ORDER BY id_number", PATIENT_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to list patients: {}", e),
            })?;

        let mut patients = Vec::with_capacity(rows.len());
        for row in rows {
            patients.push(Self::row_to_patient(&row)?);
        }
        Ok(patients)
    }

    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<Patient>, DomainError> {
        let query = format!(
            "SELECT {} FROM patients WHERE id_number = ? LIMIT 1",
            PATIENT_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(id_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find patient: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_patient(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_detail(&self, id_number: &str) -> Result<Option<PatientDetail>, DomainError> {
        let patient = match self.find_by_id_number(id_number).await? {
            Some(patient) => patient,
            None => return Ok(None),
        };

        let diseases = self.load_diseases(id_number).await?;
        let programs = self.load_programs(id_number).await?;
        let treatments = self.load_treatments(id_number).await?;

        Ok(Some(PatientDetail {
            patient,
            diseases,
            programs,
            treatments,
        }))
    }

    async fn create(&self, patient: Patient) -> Result<Patient, DomainError> {
        let query = r#"
            INSERT INTO patients (
                id_type, id_number, first_names, last_names, birth_date,
                sex, department, city, housing_id, status_id
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&patient.id_type)
            .bind(&patient.id_number)
            .bind(&patient.first_names)
            .bind(&patient.last_names)
            .bind(patient.birth_date)
            .bind(patient.sex.map(|s| s.as_str()))
            .bind(&patient.department)
            .bind(&patient.city)
            .bind(patient.housing_id)
            .bind(patient.status_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create patient: {}", e),
            })?;

        Ok(patient)
    }

    async fn update(&self, patient: Patient) -> Result<Patient, DomainError> {
        let query = r#"
            UPDATE patients
            SET id_type = ?, first_names = ?, last_names = ?, birth_date = ?,
                sex = ?, department = ?, city = ?, housing_id = ?, status_id = ?
            WHERE id_number = ?
        "#;

        let result = sqlx::query(query)
            .bind(&patient.id_type)
            .bind(&patient.first_names)
            .bind(&patient.last_names)
            .bind(patient.birth_date)
            .bind(patient.sex.map(|s| s.as_str()))
            .bind(&patient.department)
            .bind(&patient.city)
            .bind(patient.housing_id)
            .bind(patient.status_id)
            .bind(&patient.id_number)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update patient: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "Patient".to_string(),
            });
        }

        Ok(patient)
    }

    async fn delete(&self, id_number: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM patients WHERE id_number = ?")
            .bind(id_number)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete patient: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_diagnosis(
        &self,
        id_number: &str,
        diagnosis: DiseaseDiagnosis,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO patient_diseases (patient_id, disease_id, diagnosed_on, stage)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(id_number)
            .bind(diagnosis.disease_id)
            .bind(diagnosis.diagnosed_on)
            .bind(&diagnosis.stage)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to record diagnosis: {}", e),
            })?;

        Ok(())
    }

    async fn add_enrollment(
        &self,
        id_number: &str,
        enrollment: ProgramEnrollment,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO patient_programs (patient_id, program_id, enrolled_on, notes)
            VALUES (?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(id_number)
            .bind(enrollment.program_id)
            .bind(enrollment.enrolled_on)
            .bind(&enrollment.notes)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to record enrollment: {}", e),
            })?;

        Ok(())
    }

    async fn add_treatment(
        &self,
        id_number: &str,
        course: TreatmentCourse,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO patient_treatments (patient_id, treatment_id, started_on, ended_on, outcome)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(id_number)
            .bind(course.treatment_id)
            .bind(course.started_on)
            .bind(course.ended_on)
            .bind(&course.outcome)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to record treatment: {}", e),
            })?;

        Ok(())
    }
}
