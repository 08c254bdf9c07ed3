//! MySQL implementation of the CatalogRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use cr_core::domain::entities::catalog::{
    Disease, HealthProgram, HousingUnit, PatientStatus, Treatment,
};
use cr_core::errors::DomainError;
use cr_core::repositories::CatalogRepository;

/// MySQL implementation of CatalogRepository
pub struct MySqlCatalogRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCatalogRepository {
    /// Create a new MySQL catalog repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Load an id/name catalog table
    async fn named_entries(&self, table: &str) -> Result<Vec<(i64, String)>, DomainError> {
        // Table names come from the fixed set below, never from input.
        let query = format!("SELECT id, name FROM {} ORDER BY name", table);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load catalog {}: {}", table, e),
            })?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?;
            let name: String = row.try_get("name").map_err(|e| DomainError::Internal {
                message: format!("Failed to get name: {}", e),
            })?;
            entries.push((id, name));
        }
        Ok(entries)
    }
}

#[async_trait]
impl CatalogRepository for MySqlCatalogRepository {
    async fn housing_units(&self) -> Result<Vec<HousingUnit>, DomainError> {
        let query = "SELECT id, floor_type, neighborhood FROM housing_units ORDER BY neighborhood";

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to load housing catalog: {}", e),
            })?;

        let mut units = Vec::with_capacity(rows.len());
        for row in rows {
            units.push(HousingUnit {
                id: row.try_get("id").map_err(|e| DomainError::Internal {
                    message: format!("Failed to get id: {}", e),
                })?,
                floor_type: row
                    .try_get("floor_type")
                    .map_err(|e| DomainError::Internal {
                        message: format!("Failed to get floor_type: {}", e),
                    })?,
                neighborhood: row
                    .try_get("neighborhood")
                    .map_err(|e| DomainError::Internal {
                        message: format!("Failed to get neighborhood: {}", e),
                    })?,
            });
        }
        Ok(units)
    }

    async fn patient_statuses(&self) -> Result<Vec<PatientStatus>, DomainError> {
        Ok(self
            .named_entries("patient_statuses")
            .await?
            .into_iter()
            .map(|(id, name)| PatientStatus { id, name })
            .collect())
    }

    async fn diseases(&self) -> Result<Vec<Disease>, DomainError> {
        Ok(self
            .named_entries("diseases")
            .await?
            .into_iter()
            .map(|(id, name)| Disease { id, name })
            .collect())
    }

    async fn health_programs(&self) -> Result<Vec<HealthProgram>, DomainError> {
        Ok(self
            .named_entries("health_programs")
            .await?
            .into_iter()
            .map(|(id, name)| HealthProgram { id, name })
            .collect())
    }

    async fn treatments(&self) -> Result<Vec<Treatment>, DomainError> {
        Ok(self
            .named_entries("treatments")
            .await?
            .into_iter()
            .map(|(id, name)| Treatment { id, name })
            .collect())
    }
}
