//! Assessment service: runs every calculator, the contraindication checklist
//! and the decision tree for one profile.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::calculators::{
    AscvdCalculator, FraminghamCalculator, FraxCalculator, GailCalculator,
    SimplifiedBreastCancerCalculator, WellsCalculator,
};
use crate::domain::{
    check_contraindications, recommend, AppliedDefault, ComprehensiveAssessmentResult,
    PatientRiskProfile, RiskCalculator, RiskLevel, RiskResult, TreatmentInputs,
};
use crate::MenoguardError;

/// Fallback policy for a profile that carries no clinical data at all
/// (only symptom scores and the defaulted enums).
///
/// A profile with any clinical data never receives fallbacks: a missing age
/// then stays missing and each age-gated calculator reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// When false, a symptom-only profile is assessed as supplied and every
    /// age-gated calculator reports "not computed"
    pub apply_fallbacks: bool,

    pub fallback_age: u32,

    pub fallback_height_cm: f64,

    pub fallback_weight_kg: f64,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            apply_fallbacks: true,
            fallback_age: 50,
            fallback_height_cm: 165.0,
            fallback_weight_kg: 70.0,
        }
    }
}

impl AssessmentConfig {
    /// Parse a JSON config; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(text: &str) -> crate::Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns error if the file cannot be read or is not a valid config.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// # Errors
    /// Returns error if a fallback value is outside its plausible range.
    pub fn validate(&self) -> crate::Result<()> {
        if self.fallback_age > 120 {
            return Err(MenoguardError::Config(format!(
                "fallback_age {} out of range [0, 120]",
                self.fallback_age
            )));
        }
        if !(self.fallback_height_cm.is_finite() && (30.0..=250.0).contains(&self.fallback_height_cm)) {
            return Err(MenoguardError::Config(format!(
                "fallback_height_cm {} out of range [30, 250]",
                self.fallback_height_cm
            )));
        }
        if !(self.fallback_weight_kg.is_finite() && (2.0..=400.0).contains(&self.fallback_weight_kg)) {
            return Err(MenoguardError::Config(format!(
                "fallback_weight_kg {} out of range [2, 400]",
                self.fallback_weight_kg
            )));
        }
        Ok(())
    }
}

/// Comprehensive assessment entry point.
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct AssessmentService {
    config: AssessmentConfig,
}

impl AssessmentService {
    #[must_use]
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Assess `profile`, stamped with the current time.
    ///
    /// # Errors
    /// Returns error if the profile is blank or structurally invalid.
    pub fn assess(&self, profile: &PatientRiskProfile) -> crate::Result<ComprehensiveAssessmentResult> {
        self.assess_at(profile, Utc::now())
    }

    /// Assess `profile` with an explicit timestamp. Identical inputs give
    /// identical results.
    ///
    /// # Errors
    /// Returns error if the profile is blank or structurally invalid.
    pub fn assess_at(
        &self,
        profile: &PatientRiskProfile,
        computed_at: DateTime<Utc>,
    ) -> crate::Result<ComprehensiveAssessmentResult> {
        if profile.is_blank() {
            return Err(MenoguardError::EmptyProfile);
        }
        profile.validate().map_err(MenoguardError::Validation)?;

        let (prepared, applied_defaults) = self.prepare(profile);

        let ascvd = run(&AscvdCalculator, &prepared);
        let framingham = run(&FraminghamCalculator, &prepared);
        let gail = run(&GailCalculator, &prepared);
        let breast_simplified = run(&SimplifiedBreastCancerCalculator, &prepared);
        let wells = run(&WellsCalculator, &prepared);
        let frax = run(&FraxCalculator, &prepared);

        let contraindications = check_contraindications(&prepared);

        let tree_inputs = TreatmentInputs::from_profile(
            &prepared,
            primary_or_fallback(&gail, &breast_simplified),
            primary_or_fallback(&ascvd, &framingham),
            wells.level(),
        );
        let recommendation = recommend(&tree_inputs);

        tracing::info!(
            breast = %tree_inputs.breast,
            cardiovascular = %tree_inputs.cardiovascular,
            vte = %tree_inputs.vte,
            therapy = %recommendation.therapy,
            route = %recommendation.route,
            alerts = contraindications.len(),
            defaults = applied_defaults.len(),
            "Assessment complete"
        );

        Ok(ComprehensiveAssessmentResult {
            ascvd,
            framingham,
            gail,
            breast_simplified,
            wells,
            frax,
            contraindications,
            recommendation,
            tree_inputs,
            applied_defaults,
            computed_at,
        })
    }

    /// Copy of the profile with fallbacks and derived BMI filled in.
    ///
    /// Required inputs are never invented for a profile that carries clinical
    /// data; fallbacks apply only to one that carries none.
    fn prepare(&self, profile: &PatientRiskProfile) -> (PatientRiskProfile, Vec<AppliedDefault>) {
        let mut prepared = profile.clone();
        let mut applied = Vec::new();

        if self.config.apply_fallbacks && !profile.has_clinical_data() {
            prepared.age = Some(self.config.fallback_age);
            prepared.height_cm = Some(self.config.fallback_height_cm);
            prepared.weight_kg = Some(self.config.fallback_weight_kg);
            applied.extend([
                AppliedDefault {
                    field: "age".to_string(),
                    value: f64::from(self.config.fallback_age),
                },
                AppliedDefault {
                    field: "height_cm".to_string(),
                    value: self.config.fallback_height_cm,
                },
                AppliedDefault {
                    field: "weight_kg".to_string(),
                    value: self.config.fallback_weight_kg,
                },
            ]);
        }

        prepared.bmi = prepared.bmi();
        (prepared, applied)
    }
}

fn run(calculator: &dyn RiskCalculator, profile: &PatientRiskProfile) -> RiskResult {
    let result = calculator.calculate(profile);
    tracing::debug!(
        calculator = calculator.kind().name(),
        computed = result.is_computed(),
        category = %result.category,
        missing = result.missing_inputs.len(),
        "Calculator finished"
    );
    result
}

/// Level of the primary result, or of the fallback when the primary could
/// not be computed. Both absent reads as Low.
fn primary_or_fallback(primary: &RiskResult, fallback: &RiskResult) -> RiskLevel {
    if primary.is_computed() {
        primary.level()
    } else {
        fallback.level()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::{RiskCategory, TherapyType};

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_blank_profile_rejected() {
        let service = AssessmentService::default();
        let err = service
            .assess(&PatientRiskProfile::default())
            .expect_err("blank profile must be rejected");
        assert!(matches!(err, MenoguardError::EmptyProfile));
    }

    #[test]
    fn test_invalid_profile_lists_every_problem() {
        let profile = PatientRiskProfile {
            age: Some(130),
            systolic_bp: Some(900.0),
            ..Default::default()
        };
        match AssessmentService::default().assess(&profile) {
            Err(MenoguardError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_fallbacks_are_recorded_for_symptom_only_profile() {
        let mut profile = PatientRiskProfile::default();
        profile.symptoms.hot_flushes = 8;
        let result = AssessmentService::default()
            .assess_at(&profile, fixed_time())
            .expect("assessment");
        let fields: Vec<_> = result.applied_defaults.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["age", "height_cm", "weight_kg"]);
        assert!(result.frax.is_computed());
    }

    #[test]
    fn test_missing_age_is_not_invented() {
        let profile = PatientRiskProfile {
            smoking: true,
            ..Default::default()
        };
        let result = AssessmentService::default()
            .assess_at(&profile, fixed_time())
            .expect("assessment");
        assert!(result.applied_defaults.is_empty());
        assert!(!result.frax.is_computed());
        assert_eq!(result.frax.missing_inputs, vec!["age (40-90)".to_string()]);
        assert!(!result.framingham.is_computed());
        assert!(!result.breast_simplified.is_computed());
    }

    #[test]
    fn test_missing_age_with_full_labs_reports_age() {
        let profile = PatientRiskProfile {
            total_cholesterol: Some(240.0),
            hdl_cholesterol: Some(40.0),
            systolic_bp: Some(150.0),
            smoking: true,
            ..Default::default()
        };
        let result = AssessmentService::default()
            .assess_at(&profile, fixed_time())
            .expect("assessment");
        assert!(!result.ascvd.is_computed());
        assert_eq!(result.ascvd.value, 0.0);
        assert_eq!(result.ascvd.missing_inputs, vec!["age (40-79)".to_string()]);
        assert!(result.applied_defaults.is_empty());
    }

    #[test]
    fn test_supplied_measurements_are_not_overridden() {
        let profile = PatientRiskProfile {
            age: Some(58),
            weight_kg: Some(80.0),
            ..Default::default()
        };
        let result = AssessmentService::default()
            .assess_at(&profile, fixed_time())
            .expect("assessment");
        assert!(result.applied_defaults.is_empty());
    }

    #[test]
    fn test_fallbacks_disabled() {
        let service = AssessmentService::new(AssessmentConfig {
            apply_fallbacks: false,
            ..Default::default()
        });
        let mut profile = PatientRiskProfile::default();
        profile.symptoms.vaginal_dryness = 6;
        let result = service.assess_at(&profile, fixed_time()).expect("assessment");
        assert!(result.applied_defaults.is_empty());
        assert!(!result.frax.is_computed());
        assert!(!result.framingham.is_computed());
    }

    #[test]
    fn test_cardiovascular_falls_back_to_legacy() {
        let profile = PatientRiskProfile {
            age: Some(65),
            smoking: true,
            diabetes: true,
            hypertension: true,
            high_cholesterol: true,
            bmi: Some(32.0),
            ..Default::default()
        };
        let result = AssessmentService::default()
            .assess_at(&profile, fixed_time())
            .expect("assessment");
        assert!(!result.ascvd.is_computed());
        assert_eq!(result.framingham.category, RiskCategory::High);
        assert_eq!(result.tree_inputs.cardiovascular, RiskLevel::High);
    }

    #[test]
    fn test_primary_cardiovascular_wins_when_computed() {
        let profile = PatientRiskProfile {
            age: Some(55),
            total_cholesterol: Some(213.0),
            hdl_cholesterol: Some(50.0),
            systolic_bp: Some(120.0),
            ..Default::default()
        };
        let result = AssessmentService::default()
            .assess_at(&profile, fixed_time())
            .expect("assessment");
        assert!(result.ascvd.is_computed());
        assert_eq!(result.tree_inputs.cardiovascular, result.ascvd.level());
    }

    #[test]
    fn test_profile_is_not_mutated_and_result_is_deterministic() {
        let profile = PatientRiskProfile {
            age: Some(52),
            height_cm: Some(160.0),
            weight_kg: Some(64.0),
            hysterectomy: true,
            ..Default::default()
        };
        let before = profile.clone();
        let service = AssessmentService::default();
        let a = service.assess_at(&profile, fixed_time()).expect("first");
        let b = service.assess_at(&profile, fixed_time()).expect("second");
        assert_eq!(profile, before);
        assert_eq!(a, b);
        assert_eq!(a.recommendation.therapy, TherapyType::EstrogenOnly);
    }

    #[test]
    fn test_config_from_json() {
        let cfg = AssessmentConfig::from_json_str(r#"{"fallback_age": 55}"#).expect("config");
        assert_eq!(cfg.fallback_age, 55);
        assert_eq!(cfg.fallback_weight_kg, 70.0);
        assert!(cfg.apply_fallbacks);

        let err = AssessmentConfig::from_json_str(r#"{"fallback_height_cm": 5.0}"#)
            .expect_err("out of range");
        assert!(matches!(err, MenoguardError::Config(_)));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AssessmentService>();
    }
}
