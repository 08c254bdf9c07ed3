//! Reference catalog entities.
//!
//! Catalogs are read-only lookup tables the frontend loads before a patient
//! form is rendered. They are maintained out of band.

use serde::{Deserialize, Serialize};

/// Housing conditions catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingUnit {
    pub id: i64,
    /// Floor material type (dirt, cement, tile, ...)
    pub floor_type: String,
    /// Neighborhood the unit is located in
    pub neighborhood: String,
}

/// Patient follow-up status catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientStatus {
    pub id: i64,
    pub name: String,
}

/// Disease catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disease {
    pub id: i64,
    pub name: String,
}

/// Health program catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthProgram {
    pub id: i64,
    pub name: String,
}

/// Treatment catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: i64,
    pub name: String,
}
