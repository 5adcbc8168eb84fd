//! # Menoguard
//!
//! Offline clinical risk scoring and hormone-therapy recommendation engine.
//!
//! This crate provides:
//! - Six independent risk calculators (cardiovascular, breast cancer, VTE,
//!   fracture) with population baseline comparison
//! - A contraindication checklist and a drug-interaction lookup table
//! - A deterministic treatment recommendation decision tree
//! - An orchestrator that combines all of the above into one result
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Clinical types, calculators and decision logic (pure)
//! - `ports`: Trait definitions for reference data sources
//! - `adapters`: Concrete rule sources (built-in table, JSON)
//! - `application`: Assessment and interaction services

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub use application::{AssessmentConfig, AssessmentService, InteractionChecker};
pub use domain::{ComprehensiveAssessmentResult, PatientRiskProfile, RiskLevel};

/// Result type for Menoguard operations
pub type Result<T> = std::result::Result<T, MenoguardError>;

/// Main error type for Menoguard
#[derive(Debug, thiserror::Error)]
pub enum MenoguardError {
    #[error("No patient data supplied")]
    EmptyProfile,

    #[error("Invalid patient data: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Rule source error: {0}")]
    RuleSource(#[from] ports::RuleSourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
