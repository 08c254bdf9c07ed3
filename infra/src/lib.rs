//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the CareRecord
//! application, following Clean Architecture principles. It provides the
//! concrete MySQL implementations of the repository traits defined in
//! `cr_core` and the database connection management around them.
//!
//! ## Architecture
//!
//! - **Database**: MySQL implementations using SQLx
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use cr_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
