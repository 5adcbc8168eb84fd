//! Aggregate result of one comprehensive assessment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contraindication::{ContraindicationAlert, ContraindicationType};
use super::risk::RiskResult;
use super::treatment::{TreatmentInputs, TreatmentRecommendation};

/// A fallback value substituted for a measurement the caller never supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedDefault {
    pub field: String,
    pub value: f64,
}

/// Everything the orchestrator produced for one profile. Always fully
/// populated; individual calculators may still report "not computed".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveAssessmentResult {
    /// Pooled cohort 10-year cardiovascular risk (primary)
    pub ascvd: RiskResult,
    /// Point-based cardiovascular risk (legacy)
    pub framingham: RiskResult,
    /// Gail-style breast cancer risk (primary)
    pub gail: RiskResult,
    /// Multiplicative breast cancer risk (simplified)
    pub breast_simplified: RiskResult,
    pub wells: RiskResult,
    pub frax: RiskResult,
    pub contraindications: Vec<ContraindicationAlert>,
    pub recommendation: TreatmentRecommendation,
    /// Levels the decision tree consumed
    pub tree_inputs: TreatmentInputs,
    pub applied_defaults: Vec<AppliedDefault>,
    pub computed_at: DateTime<Utc>,
}

impl ComprehensiveAssessmentResult {
    /// All six results in a fixed order.
    #[must_use]
    pub fn risk_results(&self) -> [&RiskResult; 6] {
        [
            &self.ascvd,
            &self.framingham,
            &self.gail,
            &self.breast_simplified,
            &self.wells,
            &self.frax,
        ]
    }

    #[must_use]
    pub fn absolute_contraindications(&self) -> Vec<&ContraindicationAlert> {
        self.contraindications
            .iter()
            .filter(|a| a.kind == ContraindicationType::Absolute)
            .collect()
    }

    /// The tree does not read the checklist; callers should surface this next
    /// to the recommendation.
    #[must_use]
    pub fn has_absolute_contraindication(&self) -> bool {
        self.contraindications
            .iter()
            .any(|a| a.kind == ContraindicationType::Absolute)
    }
}
