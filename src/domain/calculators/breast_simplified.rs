//! Simplified multiplicative breast cancer risk.
//!
//! Uses its own thresholds; do not compare its categories with the Gail-style
//! model.

use super::{round2, RequiredInputs, RiskCalculator};
use crate::domain::baseline;
use crate::domain::patient::{MenopausalStatus, PatientRiskProfile};
use crate::domain::risk::{CalculatorKind, RiskCategory, RiskResult};

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 100;

/// Upper bound on the compounded risk (%).
pub const RISK_CAP: f64 = 15.0;

const FAMILY_HISTORY_MULTIPLIER: f64 = 2.0;
const OVARIAN_FAMILY_HISTORY_MULTIPLIER: f64 = 1.5;
const PERSONAL_HISTORY_MULTIPLIER: f64 = 4.0;
const OBESITY_MULTIPLIER: f64 = 1.2;

fn base_risk(age: u32) -> f64 {
    match age {
        a if a < 40 => 0.5,
        a if a < 50 => 1.5,
        a if a < 60 => 2.3,
        a if a < 70 => 3.5,
        _ => 3.9,
    }
}

fn menopausal_multiplier(status: MenopausalStatus) -> f64 {
    match status {
        MenopausalStatus::Premenopausal => 1.0,
        MenopausalStatus::Perimenopausal => 1.05,
        MenopausalStatus::Postmenopausal => 1.1,
    }
}

/// Category thresholds: <5 Low, <10 Moderate, else High.
#[must_use]
pub fn categorize(risk: f64) -> RiskCategory {
    if risk < 5.0 {
        RiskCategory::Low
    } else if risk < 10.0 {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SimplifiedBreastCancerCalculator;

impl RiskCalculator for SimplifiedBreastCancerCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::BreastCancerSimplified
    }

    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult {
        let baseline = baseline::breast_cancer_ten_year(profile.age.unwrap_or(0));

        let mut req = RequiredInputs::new();
        let Some(age) = req.require_age(profile.age, MIN_AGE, MAX_AGE) else {
            return RiskResult::not_computed(self.kind(), baseline, req.into_missing());
        };

        let mut risk = base_risk(age) * menopausal_multiplier(profile.menopausal_status);
        if profile.family_history_breast_cancer {
            risk *= FAMILY_HISTORY_MULTIPLIER;
        }
        if profile.family_history_ovarian_cancer {
            risk *= OVARIAN_FAMILY_HISTORY_MULTIPLIER;
        }
        if profile.personal_history_breast_cancer {
            risk *= PERSONAL_HISTORY_MULTIPLIER;
        }
        // BMI is secondary: unknown counts as non-obese
        if profile.bmi().is_some_and(|b| b >= 30.0) {
            risk *= OBESITY_MULTIPLIER;
        }
        let risk = round2(risk.min(RISK_CAP));
        let category = categorize(risk);

        RiskResult {
            calculator: self.kind(),
            value: risk,
            secondary_value: None,
            category,
            interpretation: format!("{category} estimated 10-year breast cancer risk ({risk}%)"),
            baseline,
            percentile: Some(baseline::percentile_rank(risk, baseline)),
            override_reason: None,
            missing_inputs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_risk_by_age() {
        let profile = PatientRiskProfile {
            age: Some(55),
            menopausal_status: MenopausalStatus::Premenopausal,
            ..Default::default()
        };
        let result = SimplifiedBreastCancerCalculator.calculate(&profile);
        assert_eq!(result.value, 2.3);
        assert_eq!(result.category, RiskCategory::Low);
    }

    #[test]
    fn test_multipliers_compound() {
        let profile = PatientRiskProfile {
            age: Some(55),
            menopausal_status: MenopausalStatus::Postmenopausal,
            family_history_breast_cancer: true,
            bmi: Some(31.0),
            ..Default::default()
        };
        let result = SimplifiedBreastCancerCalculator.calculate(&profile);
        assert_eq!(result.value, 6.07);
        assert_eq!(result.category, RiskCategory::Moderate);
    }

    #[test]
    fn test_cap_prevents_runaway() {
        let profile = PatientRiskProfile {
            age: Some(72),
            family_history_breast_cancer: true,
            family_history_ovarian_cancer: true,
            personal_history_breast_cancer: true,
            bmi: Some(36.0),
            ..Default::default()
        };
        let result = SimplifiedBreastCancerCalculator.calculate(&profile);
        assert_eq!(result.value, RISK_CAP);
        assert_eq!(result.category, RiskCategory::High);
    }

    #[test]
    fn test_requires_age() {
        let result = SimplifiedBreastCancerCalculator.calculate(&PatientRiskProfile::default());
        assert!(!result.is_computed());
        assert_eq!(result.missing_inputs, vec!["age (18-100)".to_string()]);
    }

    #[test]
    fn test_categories() {
        assert_eq!(categorize(4.99), RiskCategory::Low);
        assert_eq!(categorize(5.0), RiskCategory::Moderate);
        assert_eq!(categorize(10.0), RiskCategory::High);
    }
}
