//! Gail-style breast cancer risk.
//!
//! Relative risk is the product of menarche, first-birth, relative-count and
//! biopsy factors, applied to an age-band 5-year incidence and scaled by
//! ethnicity.

use super::{round2, RequiredInputs, RiskCalculator};
use crate::domain::baseline;
use crate::domain::patient::{Ethnicity, PatientRiskProfile};
use crate::domain::risk::{CalculatorKind, RiskCategory, RiskResult};

const MIN_AGE: u32 = 35;
const MAX_AGE: u32 = 85;

const LIFETIME_RISK_CAP: f64 = 85.0;

/// 5-year baseline incidence (%) for 35-39 .. 80-85.
const BASE_FIVE_YEAR_INCIDENCE: [f64; 10] = [0.25, 0.55, 0.85, 1.05, 1.25, 1.45, 1.60, 1.70, 1.65, 1.55];

const ATYPICAL_HYPERPLASIA_RR: f64 = 1.82;
const NO_ATYPIA_RR: f64 = 0.93;

fn ethnicity_multiplier(ethnicity: Ethnicity) -> f64 {
    match ethnicity {
        Ethnicity::White => 1.0,
        Ethnicity::Black => 0.9,
        Ethnicity::Hispanic => 0.75,
        Ethnicity::Asian => 0.7,
        Ethnicity::Other => 0.95,
    }
}

fn base_lifetime_risk(ethnicity: Ethnicity) -> f64 {
    match ethnicity {
        Ethnicity::White => 12.5,
        Ethnicity::Black => 11.0,
        Ethnicity::Hispanic => 10.0,
        Ethnicity::Asian => 9.5,
        Ethnicity::Other => 12.0,
    }
}

fn menarche_rr(age_at_menarche: u32) -> f64 {
    match age_at_menarche {
        a if a >= 14 => 1.0,
        12 | 13 => 1.10,
        _ => 1.21,
    }
}

/// Nulliparous patients share the 25-29 bucket.
fn first_birth_rr(age_at_first_birth: Option<u32>) -> f64 {
    match age_at_first_birth {
        Some(a) if a < 20 => 1.0,
        Some(a) if a < 25 => 1.24,
        Some(a) if a < 30 => 1.55,
        Some(_) => 1.93,
        None => 1.55,
    }
}

fn relatives_rr(count: u8) -> f64 {
    match count {
        0 => 1.0,
        1 => 2.6,
        _ => 6.8,
    }
}

fn biopsy_rr(age: u32, biopsies: u8, atypia: Option<bool>) -> f64 {
    let count_rr = match (biopsies, age < 50) {
        (0, _) => 1.0,
        (1, true) => 1.70,
        (_, true) => 2.88,
        (1, false) => 1.27,
        (_, false) => 1.62,
    };
    let atypia_rr = match (biopsies, atypia) {
        (0, _) | (_, None) => 1.0,
        (_, Some(true)) => ATYPICAL_HYPERPLASIA_RR,
        (_, Some(false)) => NO_ATYPIA_RR,
    };
    count_rr * atypia_rr
}

/// Category thresholds on 5-year risk: >=3.0 High, >=1.7 Moderate, else Low.
#[must_use]
pub fn categorize(five_year_risk: f64) -> RiskCategory {
    if five_year_risk >= 3.0 {
        RiskCategory::High
    } else if five_year_risk >= 1.7 {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}

/// Gail-style calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GailCalculator;

impl GailCalculator {
    /// Combined relative risk for the reproductive, family and biopsy factors.
    #[must_use]
    pub fn relative_risk(profile: &PatientRiskProfile, age: u32, menarche: u32, relatives: u8) -> f64 {
        menarche_rr(menarche)
            * first_birth_rr(profile.age_at_first_birth)
            * relatives_rr(relatives)
            * biopsy_rr(
                age,
                profile.breast_biopsies.unwrap_or(0),
                profile.atypical_hyperplasia,
            )
    }

    fn base_incidence(age: u32) -> f64 {
        let band = ((age.clamp(MIN_AGE, MAX_AGE) - MIN_AGE) / 5) as usize;
        BASE_FIVE_YEAR_INCIDENCE[band.min(BASE_FIVE_YEAR_INCIDENCE.len() - 1)]
    }

    fn personal_history_override(&self, baseline: f64) -> RiskResult {
        RiskResult {
            calculator: self.kind(),
            value: 0.0,
            secondary_value: None,
            category: RiskCategory::High,
            interpretation: "Personal history of breast cancer: model not applicable, managed as high risk"
                .to_string(),
            baseline,
            percentile: None,
            override_reason: Some("Personal history of breast cancer".to_string()),
            missing_inputs: Vec::new(),
        }
    }
}

impl RiskCalculator for GailCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Gail
    }

    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult {
        let ethnicity = profile.ethnicity_or_default();
        let baseline = baseline::breast_cancer_five_year(profile.age.unwrap_or(0), ethnicity);

        if profile.personal_history_breast_cancer {
            return self.personal_history_override(baseline);
        }

        let mut req = RequiredInputs::new();
        let age = req.require_age(profile.age, MIN_AGE, MAX_AGE);
        let menarche = req.require("age_at_menarche", profile.age_at_menarche);
        let relatives = req.require(
            "first_degree_relatives_breast_cancer",
            profile.first_degree_relatives_breast_cancer,
        );
        let (Some(age), Some(menarche), Some(relatives)) = (age, menarche, relatives) else {
            return RiskResult::not_computed(self.kind(), baseline, req.into_missing());
        };

        let rr = Self::relative_risk(profile, age, menarche, relatives);
        let five_year = round2(
            (Self::base_incidence(age) * rr * ethnicity_multiplier(ethnicity)).clamp(0.0, 100.0),
        );
        let lifetime = round2((base_lifetime_risk(ethnicity) * rr.sqrt()).min(LIFETIME_RISK_CAP));
        let category = categorize(five_year);

        RiskResult {
            calculator: self.kind(),
            value: five_year,
            secondary_value: Some(lifetime),
            category,
            interpretation: format!(
                "{category} 5-year breast cancer risk ({five_year}%), estimated lifetime risk {lifetime}%"
            ),
            baseline,
            percentile: Some(baseline::percentile_rank(five_year, baseline)),
            override_reason: None,
            missing_inputs: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> PatientRiskProfile {
        PatientRiskProfile {
            age: Some(50),
            age_at_menarche: Some(14),
            age_at_first_birth: Some(19),
            first_degree_relatives_breast_cancer: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn test_average_risk_profile() {
        let result = GailCalculator.calculate(&base_profile());
        assert!(result.is_computed());
        assert_eq!(result.value, 1.05);
        assert_eq!(result.secondary_value, Some(12.5));
        assert_eq!(result.category, RiskCategory::Low);
    }

    #[test]
    fn test_family_history_raises_category() {
        let mut profile = base_profile();
        profile.first_degree_relatives_breast_cancer = Some(1);
        let one = GailCalculator.calculate(&profile);
        assert_eq!(one.value, 2.73);
        assert_eq!(one.category, RiskCategory::Moderate);

        profile.first_degree_relatives_breast_cancer = Some(2);
        let two = GailCalculator.calculate(&profile);
        assert_eq!(two.category, RiskCategory::High);
        assert!(two.secondary_value.expect("lifetime") > one.secondary_value.expect("lifetime"));
    }

    #[test]
    fn test_lifetime_risk_is_capped() {
        let profile = PatientRiskProfile {
            age: Some(45),
            age_at_menarche: Some(10),
            age_at_first_birth: Some(35),
            first_degree_relatives_breast_cancer: Some(3),
            breast_biopsies: Some(2),
            atypical_hyperplasia: Some(true),
            ..Default::default()
        };
        let result = GailCalculator.calculate(&profile);
        assert!(result.secondary_value.expect("lifetime") <= LIFETIME_RISK_CAP);
        assert_eq!(result.category, RiskCategory::High);
    }

    #[test]
    fn test_atypia_modifier() {
        assert!((biopsy_rr(45, 1, Some(true)) - 1.70 * 1.82).abs() < 1e-9);
        assert!((biopsy_rr(55, 2, Some(false)) - 1.62 * 0.93).abs() < 1e-9);
        assert_eq!(biopsy_rr(55, 0, Some(true)), 1.0);
    }

    #[test]
    fn test_ethnicity_scales_risk() {
        let mut profile = base_profile();
        profile.ethnicity = Some(Ethnicity::Asian);
        let result = GailCalculator.calculate(&profile);
        assert_eq!(result.value, 0.74);
        assert_eq!(result.secondary_value, Some(9.5));
    }

    #[test]
    fn test_personal_history_forces_high() {
        let profile = PatientRiskProfile {
            personal_history_breast_cancer: true,
            ..Default::default()
        };
        let result = GailCalculator.calculate(&profile);
        assert_eq!(result.category, RiskCategory::High);
        assert!(result.override_reason.is_some());
        assert!(result.missing_inputs.is_empty());
    }

    #[test]
    fn test_missing_inputs() {
        let profile = PatientRiskProfile {
            age: Some(50),
            ..Default::default()
        };
        let result = GailCalculator.calculate(&profile);
        assert!(!result.is_computed());
        assert_eq!(
            result.missing_inputs,
            vec![
                "age_at_menarche".to_string(),
                "first_degree_relatives_breast_cancer".to_string()
            ]
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(categorize(1.69), RiskCategory::Low);
        assert_eq!(categorize(1.7), RiskCategory::Moderate);
        assert_eq!(categorize(3.0), RiskCategory::High);
    }
}
