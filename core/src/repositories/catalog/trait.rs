//! Catalog repository trait for the read-only reference tables.

use async_trait::async_trait;

use crate::domain::entities::catalog::{
    Disease, HealthProgram, HousingUnit, PatientStatus, Treatment,
};
use crate::errors::DomainError;

/// Repository trait for reference catalog reads
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List housing catalog entries
    async fn housing_units(&self) -> Result<Vec<HousingUnit>, DomainError>;

    /// List patient status catalog entries
    async fn patient_statuses(&self) -> Result<Vec<PatientStatus>, DomainError>;

    /// List disease catalog entries
    async fn diseases(&self) -> Result<Vec<Disease>, DomainError>;

    /// List health program catalog entries
    async fn health_programs(&self) -> Result<Vec<HealthProgram>, DomainError>;

    /// List treatment catalog entries
    async fn treatments(&self) -> Result<Vec<Treatment>, DomainError>;
}
