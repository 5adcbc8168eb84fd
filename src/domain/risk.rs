//! Risk result types shared by every calculator.

use serde::{Deserialize, Serialize};

/// Coarse risk level consumed by the treatment decision tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No significant indicators
    Low,
    /// Caution, route or monitoring adjustments
    Moderate,
    /// Systemic therapy restricted
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Moderate => "Moderate risk - Route selection and monitoring matter",
            Self::High => "High risk - Systemic therapy restricted",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Calculator-specific category.
///
/// Each calculator draws from its own ordered subset:
/// pooled cohort uses Low/Borderline/Intermediate/High, Framingham uses
/// Low/Intermediate/High, the rest use Low/Moderate/High.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Borderline,
    Moderate,
    Intermediate,
    High,
}

impl RiskCategory {
    /// Collapse to the three-level scale used by the decision tree.
    #[must_use]
    pub fn level(self) -> RiskLevel {
        match self {
            Self::Low => RiskLevel::Low,
            Self::Borderline | Self::Moderate | Self::Intermediate => RiskLevel::Moderate,
            Self::High => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Borderline => "Borderline",
            Self::Moderate => "Moderate",
            Self::Intermediate => "Intermediate",
            Self::High => "High",
        };
        f.write_str(label)
    }
}

/// Identity of the algorithm that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    /// Pooled cohort equations, 10-year ASCVD risk
    Ascvd,
    /// Legacy Framingham point score
    Framingham,
    /// Gail-style 5-year breast cancer risk
    Gail,
    /// Simplified multiplicative breast cancer risk
    BreastCancerSimplified,
    /// Wells-style VTE likelihood score
    Wells,
    /// FRAX-style 10-year fracture probability
    Frax,
}

impl CalculatorKind {
    /// Human-readable algorithm name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascvd => "ASCVD pooled cohort equations",
            Self::Framingham => "Framingham point score (legacy)",
            Self::Gail => "Gail-style breast cancer model",
            Self::BreastCancerSimplified => "Simplified breast cancer model",
            Self::Wells => "Wells-style VTE score",
            Self::Frax => "FRAX-style fracture model",
        }
    }
}

/// Output of one calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub calculator: CalculatorKind,

    /// Primary value: a percentage, or a unitless score for Wells
    pub value: f64,

    /// Lifetime risk (Gail) or hip fracture risk (FRAX)
    pub secondary_value: Option<f64>,

    pub category: RiskCategory,

    pub interpretation: String,

    /// Population mean for the patient's age/sex/ethnicity bucket
    pub baseline: f64,

    /// Approximate percentile against the baseline; `None` when not computed
    pub percentile: Option<u8>,

    /// Set when a clinical rule fixed the category regardless of the model
    pub override_reason: Option<String>,

    /// Non-empty means "not computed"
    pub missing_inputs: Vec<String>,
}

impl RiskResult {
    /// Sentinel for a calculator that could not run.
    ///
    /// Value 0 and the lowest category are a fallback, not a clinical claim.
    #[must_use]
    pub fn not_computed(calculator: CalculatorKind, baseline: f64, missing_inputs: Vec<String>) -> Self {
        let interpretation = format!(
            "Not computed: missing or out-of-range inputs ({})",
            missing_inputs.join(", ")
        );
        Self {
            calculator,
            value: 0.0,
            secondary_value: None,
            category: RiskCategory::Low,
            interpretation,
            baseline,
            percentile: None,
            override_reason: None,
            missing_inputs,
        }
    }

    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.missing_inputs.is_empty()
    }

    #[must_use]
    pub fn level(&self) -> RiskLevel {
        self.category.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_levels() {
        assert_eq!(RiskCategory::Low.level(), RiskLevel::Low);
        assert_eq!(RiskCategory::Borderline.level(), RiskLevel::Moderate);
        assert_eq!(RiskCategory::Intermediate.level(), RiskLevel::Moderate);
        assert_eq!(RiskCategory::High.level(), RiskLevel::High);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
    }

    #[test]
    fn test_not_computed_sentinel() {
        let result = RiskResult::not_computed(
            CalculatorKind::Ascvd,
            2.5,
            vec!["systolic_bp".to_string(), "hdl_cholesterol".to_string()],
        );
        assert!(!result.is_computed());
        assert_eq!(result.value, 0.0);
        assert_eq!(result.category, RiskCategory::Low);
        assert!(result.percentile.is_none());
        assert!(result.interpretation.contains("systolic_bp, hdl_cholesterol"));
    }
}
