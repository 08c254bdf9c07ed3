//! Mock implementation of CatalogRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::catalog::{
    Disease, HealthProgram, HousingUnit, PatientStatus, Treatment,
};
use crate::errors::DomainError;

use super::trait_::CatalogRepository;

/// Mock catalog repository for testing, seeded through its setters
pub struct MockCatalogRepository {
    housing: Arc<RwLock<Vec<HousingUnit>>>,
    statuses: Arc<RwLock<Vec<PatientStatus>>>,
    diseases: Arc<RwLock<Vec<Disease>>>,
    programs: Arc<RwLock<Vec<HealthProgram>>>,
    treatments: Arc<RwLock<Vec<Treatment>>>,
}

impl MockCatalogRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            housing: Arc::new(RwLock::new(Vec::new())),
            statuses: Arc::new(RwLock::new(Vec::new())),
            diseases: Arc::new(RwLock::new(Vec::new())),
            programs: Arc::new(RwLock::new(Vec::new())),
            treatments: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn seed_housing(&self, entries: Vec<HousingUnit>) {
        *self.housing.write().await = entries;
    }

    pub async fn seed_statuses(&self, entries: Vec<PatientStatus>) {
        *self.statuses.write().await = entries;
    }

    pub async fn seed_diseases(&self, entries: Vec<Disease>) {
        *self.diseases.write().await = entries;
    }

    pub async fn seed_programs(&self, entries: Vec<HealthProgram>) {
        *self.programs.write().await = entries;
    }

    pub async fn seed_treatments(&self, entries: Vec<Treatment>) {
        *self.treatments.write().await = entries;
    }
}

impl Default for MockCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn housing_units(&self) -> Result<Vec<HousingUnit>, DomainError> {
        Ok(self.housing.read().await.clone())
    }

    async fn patient_statuses(&self) -> Result<Vec<PatientStatus>, DomainError> {
        Ok(self.statuses.read().await.clone())
    }

    async fn diseases(&self) -> Result<Vec<Disease>, DomainError> {
        Ok(self.diseases.read().await.clone())
    }

    async fn health_programs(&self) -> Result<Vec<HealthProgram>, DomainError> {
        Ok(self.programs.read().await.clone())
    }

    async fn treatments(&self) -> Result<Vec<Treatment>, DomainError> {
        Ok(self.treatments.read().await.clone())
    }
}
