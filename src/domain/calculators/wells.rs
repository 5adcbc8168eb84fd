//! Wells-style VTE likelihood score.
//!
//! There is no heart-rate input; tachycardia is approximated from
//! comorbidities (hypertension or smoking). This is a known approximation
//! and is reported as such in the interpretation.

use super::RiskCalculator;
use crate::domain::baseline;
use crate::domain::patient::PatientRiskProfile;
use crate::domain::risk::{CalculatorKind, RiskCategory, RiskResult};

pub const PRIOR_DVT_POINTS: f64 = 3.0;
pub const THROMBOPHILIA_POINTS: f64 = 3.0;
pub const TACHYCARDIA_PROXY_POINTS: f64 = 1.5;
pub const OBESITY_POINTS: f64 = 1.0;
pub const AGE_POINTS: f64 = 1.0;

const OBESITY_BMI: f64 = 30.0;
const AGE_THRESHOLD: u32 = 60;

/// Category thresholds: <=4 Low, <=6 Moderate, else High.
#[must_use]
pub fn categorize(score: f64) -> RiskCategory {
    if score <= 4.0 {
        RiskCategory::Low
    } else if score <= 6.0 {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}

fn probability_range(category: RiskCategory) -> &'static str {
    match category {
        RiskCategory::Low => "Low VTE likelihood (approx. 3-5% probability)",
        RiskCategory::High => "High VTE likelihood (approx. 50-65% probability)",
        _ => "Moderate VTE likelihood (approx. 15-20% probability)",
    }
}

/// Whether the comorbidity-based tachycardia proxy fires.
#[must_use]
pub fn tachycardia_proxy(profile: &PatientRiskProfile) -> bool {
    profile.hypertension || profile.smoking
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WellsCalculator;

impl WellsCalculator {
    #[must_use]
    pub fn score(profile: &PatientRiskProfile) -> f64 {
        let mut score = 0.0;
        if profile.personal_history_dvt {
            score += PRIOR_DVT_POINTS;
        }
        if profile.thrombophilia {
            score += THROMBOPHILIA_POINTS;
        }
        if tachycardia_proxy(profile) {
            score += TACHYCARDIA_PROXY_POINTS;
        }
        if profile.bmi().is_some_and(|b| b >= OBESITY_BMI) {
            score += OBESITY_POINTS;
        }
        if profile.age.is_some_and(|a| a >= AGE_THRESHOLD) {
            score += AGE_POINTS;
        }
        score
    }
}

impl RiskCalculator for WellsCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Wells
    }

    /// Every input is a flag with a safe "absent" reading, so this always
    /// computes.
    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult {
        let baseline = baseline::vte_score(profile.age.unwrap_or(0));
        let score = Self::score(profile);
        let category = categorize(score);

        let mut interpretation = probability_range(category).to_string();
        if tachycardia_proxy(profile) {
            interpretation.push_str("; tachycardia estimated from comorbidities");
        }

        RiskResult {
            calculator: self.kind(),
            value: score,
            secondary_value: None,
            category,
            interpretation,
            baseline,
            percentile: Some(baseline::percentile_rank(score, baseline)),
            override_reason: None,
            missing_inputs: Vec::new(),
        }
    }
}
