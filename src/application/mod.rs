//! Application layer: Use cases and services.
//!
//! This module combines domain logic with ports to implement
//! the comprehensive assessment and interaction lookups.

mod assessment;
mod interactions;

pub use assessment::{AssessmentConfig, AssessmentService};
pub use interactions::{highest_severity, InteractionChecker};
