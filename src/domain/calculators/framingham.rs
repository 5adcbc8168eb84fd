//! Legacy Framingham point score.
//!
//! Kept for continuity with the older recommendation flow. Numerically
//! distinct from the pooled cohort equations; the two are not expected to
//! agree for the same patient.

use super::{RequiredInputs, RiskCalculator};
use crate::domain::baseline;
use crate::domain::patient::{PatientRiskProfile, Sex};
use crate::domain::risk::{CalculatorKind, RiskCategory, RiskResult};

const MIN_AGE: u32 = 20;
const MAX_AGE: u32 = 79;

/// Cholesterol at or above this level (mg/dL) scores as high.
const HIGH_TOTAL_CHOLESTEROL: f64 = 240.0;

/// Points per age band (20-34, 35-39, 40-44, ..., 75-79).
const AGE_POINTS_FEMALE: [i32; 10] = [-7, -3, 0, 3, 6, 8, 10, 12, 14, 16];
const AGE_POINTS_MALE: [i32; 10] = [-9, -4, 0, 3, 6, 8, 10, 11, 12, 13];

/// 10-year risk (%) for total points starting at `first`; totals below use
/// `below`, totals past the end use the last entry.
struct PointTable {
    first: i32,
    risks: &'static [f64],
    below: f64,
}

const RISK_FEMALE: PointTable = PointTable {
    first: 9,
    risks: &[
        1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 11.0, 14.0, 17.0, 22.0, 27.0, 30.0,
    ],
    below: 0.5,
};

const RISK_MALE: PointTable = PointTable {
    first: 0,
    risks: &[
        1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 16.0, 20.0, 25.0, 30.0,
    ],
    below: 0.5,
};

impl PointTable {
    fn risk(&self, points: i32) -> f64 {
        if points < self.first {
            return self.below;
        }
        let idx = (points - self.first) as usize;
        self.risks
            .get(idx)
            .or_else(|| self.risks.last())
            .copied()
            .unwrap_or(self.below)
    }
}

/// Point contributions, kept for the interpretation trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FraminghamPoints {
    pub age: i32,
    pub cholesterol: i32,
    pub hdl: i32,
    pub blood_pressure: i32,
    pub smoking: i32,
    pub diabetes: i32,
}

impl FraminghamPoints {
    #[must_use]
    pub fn total(&self) -> i32 {
        self.age + self.cholesterol + self.hdl + self.blood_pressure + self.smoking + self.diabetes
    }
}

/// Category thresholds: <10 Low, <20 Intermediate, else High.
#[must_use]
pub fn categorize(risk: f64) -> RiskCategory {
    if risk < 10.0 {
        RiskCategory::Low
    } else if risk < 20.0 {
        RiskCategory::Intermediate
    } else {
        RiskCategory::High
    }
}

fn age_points(age: u32, sex: Sex) -> i32 {
    let band = if age < 35 { 0 } else { ((age - 35) / 5 + 1) as usize };
    let table = match sex {
        Sex::Female => &AGE_POINTS_FEMALE,
        Sex::Male => &AGE_POINTS_MALE,
    };
    table[band.min(table.len() - 1)]
}

/// Legacy point-score calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FraminghamCalculator;

impl FraminghamCalculator {
    /// Score every factor. Secondary inputs fall back to conventional
    /// assumptions: cholesterol from the flag, HDL estimated from
    /// comorbidities, blood pressure from the hypertension flag.
    #[must_use]
    pub fn points(profile: &PatientRiskProfile, age: u32) -> FraminghamPoints {
        let female = profile.sex == Sex::Female;

        let high_cholesterol = profile.high_cholesterol
            || profile
                .total_cholesterol
                .is_some_and(|tc| tc >= HIGH_TOTAL_CHOLESTEROL);
        let cholesterol = match (high_cholesterol, female) {
            (true, true) => 4,
            (true, false) => 3,
            (false, _) => 0,
        };

        let hdl = match profile.hdl_cholesterol {
            Some(h) if h >= 60.0 => -1,
            Some(h) if h >= 50.0 => 0,
            Some(h) if h >= 40.0 => 1,
            Some(_) => 2,
            None => {
                let metabolic = profile.diabetes
                    || profile.hypertension
                    || profile.bmi().is_some_and(|b| b >= 30.0);
                if metabolic {
                    2
                } else {
                    0
                }
            }
        };

        let blood_pressure = match profile.systolic_bp {
            Some(sbp) => {
                let base = match sbp {
                    s if s < 120.0 => 0,
                    s if s < 130.0 => 1,
                    s if s < 140.0 => 2,
                    s if s < 160.0 => 3,
                    _ => 4,
                };
                if profile.hypertension {
                    base + 2
                } else {
                    base
                }
            }
            None if profile.hypertension => {
                if female {
                    4
                } else {
                    2
                }
            }
            None => 0,
        };

        let smoking = match (profile.smoking, female) {
            (true, true) => 4,
            (true, false) => 3,
            (false, _) => 0,
        };
        let diabetes = match (profile.diabetes, female) {
            (true, true) => 4,
            (true, false) => 3,
            (false, _) => 0,
        };

        FraminghamPoints {
            age: age_points(age, profile.sex),
            cholesterol,
            hdl,
            blood_pressure,
            smoking,
            diabetes,
        }
    }

    /// Map a point total to a 10-year risk percentage.
    #[must_use]
    pub fn risk_for_points(total: i32, sex: Sex) -> f64 {
        match sex {
            Sex::Female => RISK_FEMALE.risk(total),
            Sex::Male => RISK_MALE.risk(total),
        }
    }
}

impl RiskCalculator for FraminghamCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Framingham
    }

    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult {
        let baseline = baseline::cardiovascular(profile.age.unwrap_or(0), profile.sex);

        let mut req = RequiredInputs::new();
        let Some(age) = req.require_age(profile.age, MIN_AGE, MAX_AGE) else {
            return RiskResult::not_computed(self.kind(), baseline, req.into_missing());
        };

        let points = Self::points(profile, age);
        let total = points.total();
        let risk = Self::risk_for_points(total, profile.sex);
        let category = categorize(risk);

        RiskResult {
            calculator: self.kind(),
            value: risk,
            secondary_value: None,
            category,
            interpretation: format!("{total} Framingham points: {category} 10-year CHD risk ({risk}%)"),
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
    fn test_age_points() {
        assert_eq!(age_points(20, Sex::Female), -7);
        assert_eq!(age_points(34, Sex::Female), -7);
        assert_eq!(age_points(35, Sex::Female), -3);
        assert_eq!(age_points(52, Sex::Female), 6);
        assert_eq!(age_points(79, Sex::Female), 16);
        assert_eq!(age_points(79, Sex::Male), 13);
    }

    #[test]
    fn test_point_table_edges() {
        assert_eq!(FraminghamCalculator::risk_for_points(3, Sex::Female), 0.5);
        assert_eq!(FraminghamCalculator::risk_for_points(9, Sex::Female), 1.0);
        assert_eq!(FraminghamCalculator::risk_for_points(20, Sex::Female), 11.0);
        assert_eq!(FraminghamCalculator::risk_for_points(40, Sex::Female), 30.0);
        assert_eq!(FraminghamCalculator::risk_for_points(-2, Sex::Male), 0.5);
        assert_eq!(FraminghamCalculator::risk_for_points(15, Sex::Male), 20.0);
    }

    #[test]
    fn test_multiple_risk_factors_score_high() {
        let profile = PatientRiskProfile {
            age: Some(65),
            smoking: true,
            diabetes: true,
            hypertension: true,
            high_cholesterol: true,
            bmi: Some(32.0),
            ..Default::default()
        };
        let points = FraminghamCalculator::points(&profile, 65);
        assert_eq!(points.total(), 30);

        let result = FraminghamCalculator.calculate(&profile);
        assert_eq!(result.value, 30.0);
        assert_eq!(result.category, RiskCategory::High);
    }

    #[test]
    fn test_healthy_profile_is_low() {
        let profile = PatientRiskProfile {
            age: Some(52),
            ..Default::default()
        };
        let result = FraminghamCalculator.calculate(&profile);
        assert!(result.is_computed());
        assert_eq!(result.category, RiskCategory::Low);
        assert!(result.value < 10.0);
    }

    #[test]
    fn test_measured_values_take_precedence() {
        let profile = PatientRiskProfile {
            age: Some(55),
            diabetes: true,
            hdl_cholesterol: Some(65.0),
            systolic_bp: Some(118.0),
            ..Default::default()
        };
        let points = FraminghamCalculator::points(&profile, 55);
        assert_eq!(points.hdl, -1);
        assert_eq!(points.blood_pressure, 0);
    }

    #[test]
    fn test_requires_age() {
        let result = FraminghamCalculator.calculate(&PatientRiskProfile::default());
        assert!(!result.is_computed());
        assert_eq!(result.missing_inputs, vec!["age (20-79)".to_string()]);

        let too_old = PatientRiskProfile {
            age: Some(80),
            ..Default::default()
        };
        assert!(!FraminghamCalculator.calculate(&too_old).is_computed());
    }

    #[test]
    fn test_categories() {
        assert_eq!(categorize(9.9), RiskCategory::Low);
        assert_eq!(categorize(10.0), RiskCategory::Intermediate);
        assert_eq!(categorize(20.0), RiskCategory::High);
    }
}
