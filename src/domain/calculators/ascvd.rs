//! 10-year ASCVD risk from the pooled cohort equations.

use super::{round2, RequiredInputs, RiskCalculator};
use crate::domain::baseline;
use crate::domain::patient::{Ethnicity, PatientRiskProfile, Sex};
use crate::domain::risk::{CalculatorKind, RiskCategory, RiskResult};

const MIN_AGE: u32 = 40;
const MAX_AGE: u32 = 79;

/// Age used in the smoking interaction term is capped here so the smoking
/// contribution never turns negative at the top of the age range.
const SMOKING_INTERACTION_AGE_CAP: f64 = 70.0;

/// One sex × race coefficient set. Terms are on natural-log inputs.
struct Coefficients {
    ln_age: f64,
    ln_age_sq: f64,
    ln_tc: f64,
    ln_age_ln_tc: f64,
    ln_hdl: f64,
    ln_age_ln_hdl: f64,
    ln_treated_sbp: f64,
    ln_age_ln_treated_sbp: f64,
    ln_untreated_sbp: f64,
    ln_age_ln_untreated_sbp: f64,
    smoker: f64,
    ln_age_smoker: f64,
    diabetes: f64,
    baseline_survival: f64,
    mean_sum: f64,
}

const WHITE_FEMALE: Coefficients = Coefficients {
    ln_age: -29.799,
    ln_age_sq: 4.884,
    ln_tc: 13.540,
    ln_age_ln_tc: -3.114,
    ln_hdl: -13.578,
    ln_age_ln_hdl: 3.149,
    ln_treated_sbp: 2.019,
    ln_age_ln_treated_sbp: 0.0,
    ln_untreated_sbp: 1.957,
    ln_age_ln_untreated_sbp: 0.0,
    smoker: 7.574,
    ln_age_smoker: -1.665,
    diabetes: 0.661,
    baseline_survival: 0.9665,
    mean_sum: -29.18,
};

const BLACK_FEMALE: Coefficients = Coefficients {
    ln_age: 17.114,
    ln_age_sq: 0.0,
    ln_tc: 0.940,
    ln_age_ln_tc: 0.0,
    ln_hdl: -18.920,
    ln_age_ln_hdl: 4.475,
    ln_treated_sbp: 29.291,
    ln_age_ln_treated_sbp: -6.432,
    ln_untreated_sbp: 27.820,
    ln_age_ln_untreated_sbp: -6.087,
    smoker: 0.691,
    ln_age_smoker: 0.0,
    diabetes: 0.874,
    baseline_survival: 0.9533,
    mean_sum: 86.61,
};

const WHITE_MALE: Coefficients = Coefficients {
    ln_age: 12.344,
    ln_age_sq: 0.0,
    ln_tc: 11.853,
    ln_age_ln_tc: -2.664,
    ln_hdl: -7.990,
    ln_age_ln_hdl: 1.769,
    ln_treated_sbp: 1.797,
    ln_age_ln_treated_sbp: 0.0,
    ln_untreated_sbp: 1.764,
    ln_age_ln_untreated_sbp: 0.0,
    smoker: 7.837,
    ln_age_smoker: -1.795,
    diabetes: 0.658,
    baseline_survival: 0.9144,
    mean_sum: 61.18,
};

const BLACK_MALE: Coefficients = Coefficients {
    ln_age: 2.469,
    ln_age_sq: 0.0,
    ln_tc: 0.302,
    ln_age_ln_tc: 0.0,
    ln_hdl: -0.307,
    ln_age_ln_hdl: 0.0,
    ln_treated_sbp: 1.916,
    ln_age_ln_treated_sbp: 0.0,
    ln_untreated_sbp: 1.809,
    ln_age_ln_untreated_sbp: 0.0,
    smoker: 0.549,
    ln_age_smoker: 0.0,
    diabetes: 0.645,
    baseline_survival: 0.8954,
    mean_sum: 19.54,
};

fn coefficients(sex: Sex, ethnicity: Ethnicity) -> &'static Coefficients {
    match (sex, ethnicity) {
        (Sex::Female, Ethnicity::Black) => &BLACK_FEMALE,
        (Sex::Female, _) => &WHITE_FEMALE,
        (Sex::Male, Ethnicity::Black) => &BLACK_MALE,
        (Sex::Male, _) => &WHITE_MALE,
    }
}

/// Category thresholds: <5 Low, <7.5 Borderline, <20 Intermediate, else High.
#[must_use]
pub fn categorize(risk: f64) -> RiskCategory {
    if risk < 5.0 {
        RiskCategory::Low
    } else if risk < 7.5 {
        RiskCategory::Borderline
    } else if risk < 20.0 {
        RiskCategory::Intermediate
    } else {
        RiskCategory::High
    }
}

fn interpretation(category: RiskCategory) -> &'static str {
    match category {
        RiskCategory::Low => "Low 10-year ASCVD risk (<5%)",
        RiskCategory::Borderline => "Borderline 10-year ASCVD risk (5-7.4%)",
        RiskCategory::High => "High 10-year ASCVD risk (>=20%)",
        _ => "Intermediate 10-year ASCVD risk (7.5-19.9%)",
    }
}

/// Pooled cohort equations calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct AscvdCalculator;

impl AscvdCalculator {
    /// Raw 10-year risk in percent, clipped to [0, 100].
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn ten_year_risk(
        sex: Sex,
        ethnicity: Ethnicity,
        age: u32,
        total_cholesterol: f64,
        hdl: f64,
        systolic_bp: f64,
        bp_treated: bool,
        smoker: bool,
        diabetic: bool,
    ) -> f64 {
        let c = coefficients(sex, ethnicity);
        let ln_age = f64::from(age).ln();
        let ln_tc = total_cholesterol.ln();
        let ln_hdl = hdl.ln();
        let ln_sbp = systolic_bp.ln();

        let mut sum = c.ln_age * ln_age
            + c.ln_age_sq * ln_age * ln_age
            + c.ln_tc * ln_tc
            + c.ln_age_ln_tc * ln_age * ln_tc
            + c.ln_hdl * ln_hdl
            + c.ln_age_ln_hdl * ln_age * ln_hdl;

        let untreated = c.ln_untreated_sbp * ln_sbp + c.ln_age_ln_untreated_sbp * ln_age * ln_sbp;
        // Treatment never scores below the untreated term (the Black female
        // interaction crosses over above age 71).
        sum += if bp_treated {
            let treated = c.ln_treated_sbp * ln_sbp + c.ln_age_ln_treated_sbp * ln_age * ln_sbp;
            treated.max(untreated)
        } else {
            untreated
        };

        if smoker {
            let capped_ln_age = f64::from(age).min(SMOKING_INTERACTION_AGE_CAP).ln();
            sum += c.smoker + c.ln_age_smoker * capped_ln_age;
        }
        if diabetic {
            sum += c.diabetes;
        }

        let risk = (1.0 - c.baseline_survival.powf((sum - c.mean_sum).exp())) * 100.0;
        if risk.is_finite() {
            risk.clamp(0.0, 100.0)
        } else {
            100.0
        }
    }
}

impl RiskCalculator for AscvdCalculator {
    fn kind(&self) -> CalculatorKind {
        CalculatorKind::Ascvd
    }

    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult {
        let baseline = baseline::cardiovascular(profile.age.unwrap_or(0), profile.sex);

        let mut req = RequiredInputs::new();
        let age = req.require_age(profile.age, MIN_AGE, MAX_AGE);
        let tc = req.require("total_cholesterol", profile.total_cholesterol);
        let hdl = req.require("hdl_cholesterol", profile.hdl_cholesterol);
        let sbp = req.require("systolic_bp", profile.systolic_bp);
        let (Some(age), Some(tc), Some(hdl), Some(sbp)) = (age, tc, hdl, sbp) else {
            return RiskResult::not_computed(self.kind(), baseline, req.into_missing());
        };

        let risk = round2(Self::ten_year_risk(
            profile.sex,
            profile.ethnicity_or_default(),
            age,
            tc,
            hdl,
            sbp,
            profile.hypertension,
            profile.smoking,
            profile.diabetes,
        ));
        let category = categorize(risk);

        RiskResult {
            calculator: self.kind(),
            value: risk,
            secondary_value: None,
            category,
            interpretation: interpretation(category).to_string(),
            baseline,
            percentile: Some(baseline::percentile_rank(risk, baseline)),
            override_reason: None,
            missing_inputs: Vec::new(),
        }
    }
}
