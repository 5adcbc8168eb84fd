//! FRAX-style 10-year fracture probability.
//!
//! Multiplicative model anchored on an exponential age factor, applied to
//! fixed hip and major osteoporotic baselines.

use super::{round2, RequiredInputs, RiskCalculator};
use crate::domain::baseline;
use crate::domain::patient::PatientRiskProfile;
use crate::domain::risk::{CalculatorKind, RiskCategory, RiskResult};

const MIN_AGE: u32 = 40;
const MAX_AGE: u32 = 90;

/// 10-year probabilities (%) at age 50 with no risk factors.
pub const BASE_MAJOR_RISK: f64 = 4.0;
pub const BASE_HIP_RISK: f64 = 0.8;

pub const MAJOR_RISK_CAP: f64 = 50.0;
pub const HIP_RISK_CAP: f64 = 30.0;

const AGE_GROWTH: f64 = 1.08;
const AGE_ANCHOR: f64 = 50.0;

const SMOKING_MULTIPLIER: f64 = 1.25;
/// Diabetes is treated as protective here (higher bone density).
const DIABETES_MULTIPLIER: f64 = 0.9;
const EARLY_MENOPAUSE_MULTIPLIER: f64 = 1.2;
const PRIOR_FRACTURE_MULTIPLIER: f64 = 1.85;
const PARENTAL_HIP_FRACTURE_MULTIPLIER: f64 = 1.4;
const GLUCOCORTICOID_MULTIPLIER: f64 = 1.6;
const RHEUMATOID_ARTHRITIS_MULTIPLIER: f64 = 1.4;
const ALCOHOL_MULTIPLIER: f64 = 1.35;
const ALCOHOL_UNITS_THRESHOLD: f64 = 3.0;

fn bmi_multiplier(bmi: Option<f64>) -> f64 {
    match bmi {
        Some(b) if b < 20.0 => 1.35,
        Some(b) if b < 25.0 => 1.0,
        Some(b) if b < 30.0 => 0.9,
        Some(_) => 0.85,
        // unknown BMI counts as the reference bucket
        None => 1.0,
    }
}

fn t_score_multiplier(t_score: Option<f64>) -> f64 {
    match t_score {
        Some(t) if t <= -2.5 => 2.0,
        Some(t) if t <= -1.0 => 1.4,
        _ => 1.0,
    }
}

/// Category by major fracture risk: <10 Low, <20 Moderate, else High.
#[must_use]
pub fn categorize(major_risk: f64) -> RiskCategory {
    if major_risk < 10.0 {
        RiskCategory::Low
    } else if major_risk < 20.0 {
        RiskCategory::Moderate
    } else {
        RiskCategory::High
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FraxCalculator;

impl FraxCalculator {
    /// Combined multiplier over age and every clinical factor.
    #[must_use]
    pub fn risk_multiplier(profile: &PatientRiskProfile, age: u32) -> f64 {
        let mut m = AGE_GROWTH.powf(f64::from(age) - AGE_ANCHOR);
        m *= bmi_multiplier(profile.bmi());
        if profile.smoking {
            m *= SMOKING_MULTIPLIER;
        }
        if profile.diabetes {
            m *= DIABETES_MULTIPLIER;
        }
        if profile.early_or_surgical_menopause() {
            m *= EARLY_MENOPAUSE_MULTIPLIER;
        }
        if profile.prior_fracture {
            m *= PRIOR_FRACTURE_MULTIPLIER;
        }
        if profile.parental_hip_fracture {
            m *= PARENTAL_HIP_FRACTURE_MULTIPLIER;
        }
        if profile.glucocorticoid_use {
            m *= GLUCOCORTICOID_MULTIPLIER;
        }
        if profile.rheumatoid_arthritis {
            m *= RHEUMATOID_ARTHRITIS_MULTIPLIER;
        }
        if profile
            .alcohol_units_per_day
            .is_some_and(|u| u >= ALCOHOL_UNITS_THRESHOLD)
        {
            m *= ALCOHOL_MULTIPLIER;
        }
        m * t_score_multiplier(profile.t_score)
    }
}

impl RiskCalculator for FraxCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Frax
    }

    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult {
        let baseline = baseline::major_fracture(profile.age.unwrap_or(0), profile.sex);

        let mut req = RequiredInputs::new();
        let Some(age) = req.require_age(profile.age, MIN_AGE, MAX_AGE) else {
            return RiskResult::not_computed(self.kind(), baseline, req.into_missing());
        };

        let multiplier = Self::risk_multiplier(profile, age);
        let major = round2((BASE_MAJOR_RISK * multiplier).min(MAJOR_RISK_CAP));
        let hip = round2((BASE_HIP_RISK * multiplier).min(HIP_RISK_CAP));
        let category = categorize(major);

        RiskResult {
            calculator: self.kind(),
            value: major,
            secondary_value: Some(hip),
            category,
            interpretation: format!(
                "{category} 10-year fracture risk: major osteoporotic {major}%, hip {hip}%"
            ),
            baseline,
            percentile: Some(baseline::percentile_rank(major, baseline)),
            override_reason: None,
            missing_inputs: Vec::new(),
        }
    }
}
