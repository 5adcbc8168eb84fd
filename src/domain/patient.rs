//! Patient risk profile: the single input to every calculation.
//!
//! Fields the caller did not collect stay `None`. Calculators decide for
//! themselves which of them are required.

use serde::{Deserialize, Serialize};

/// Biological sex as used by the risk models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[default]
    Female,
    Male,
}

/// Ethnicity buckets used by the coefficient and baseline tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ethnicity {
    #[default]
    White,
    Black,
    Hispanic,
    Asian,
    Other,
}

impl Ethnicity {
    /// Row index into the ethnicity-keyed baseline tables.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
            Self::Hispanic => 2,
            Self::Asian => 3,
            Self::Other => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenopausalStatus {
    Premenopausal,
    Perimenopausal,
    #[default]
    Postmenopausal,
}

/// Symptom severities on a 0-10 ordinal scale.
///
/// Only the decision tree looks at these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SymptomScores {
    pub hot_flushes: u8,
    pub night_sweats: u8,
    pub vaginal_dryness: u8,
    pub urinary_symptoms: u8,
    pub sleep_disturbance: u8,
    pub mood_changes: u8,
    pub joint_pain: u8,
    pub low_libido: u8,
}

impl SymptomScores {
    /// Top of the symptom scale.
    pub const MAX_SCORE: u8 = 10;

    /// Genitourinary symptom severity (worst of vaginal dryness and urinary).
    #[must_use]
    pub fn genitourinary_severity(&self) -> u8 {
        self.vaginal_dryness.max(self.urinary_symptoms)
    }

    /// Vasomotor symptom severity (worst of hot flushes and night sweats).
    #[must_use]
    pub fn vasomotor_severity(&self) -> u8 {
        self.hot_flushes.max(self.night_sweats)
    }

    fn named(&self) -> [(&'static str, u8); 8] {
        [
            ("hot_flushes", self.hot_flushes),
            ("night_sweats", self.night_sweats),
            ("vaginal_dryness", self.vaginal_dryness),
            ("urinary_symptoms", self.urinary_symptoms),
            ("sleep_disturbance", self.sleep_disturbance),
            ("mood_changes", self.mood_changes),
            ("joint_pain", self.joint_pain),
            ("low_libido", self.low_libido),
        ]
    }
}

/// Demographic, history and symptom profile of one patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientRiskProfile {
    /// Age in whole years
    pub age: Option<u32>,
    pub sex: Sex,
    pub ethnicity: Option<Ethnicity>,

    /// Height in cm
    pub height_cm: Option<f64>,
    /// Weight in kg
    pub weight_kg: Option<f64>,
    /// Body-mass index in kg/m². Derived from height and weight when absent.
    pub bmi: Option<f64>,

    pub smoking: bool,
    pub diabetes: bool,
    pub hypertension: bool,
    pub high_cholesterol: bool,

    pub family_history_breast_cancer: bool,
    pub family_history_ovarian_cancer: bool,
    pub personal_history_breast_cancer: bool,
    pub personal_history_dvt: bool,
    pub thrombophilia: bool,

    pub hysterectomy: bool,
    pub oophorectomy: bool,
    pub menopausal_status: MenopausalStatus,
    /// Patient still needs contraception (selects an IUS progestogen).
    pub needs_contraception: bool,

    /// Systolic blood pressure in mmHg
    pub systolic_bp: Option<f64>,
    /// Total cholesterol in mg/dL
    pub total_cholesterol: Option<f64>,
    /// HDL cholesterol in mg/dL
    pub hdl_cholesterol: Option<f64>,

    pub age_at_menarche: Option<u32>,
    /// `None` for nulliparous patients
    pub age_at_first_birth: Option<u32>,
    pub age_at_menopause: Option<u32>,
    pub first_degree_relatives_breast_cancer: Option<u8>,
    pub breast_biopsies: Option<u8>,
    /// `None` when no biopsy result is known
    pub atypical_hyperplasia: Option<bool>,

    pub prior_fracture: bool,
    pub parental_hip_fracture: bool,
    pub glucocorticoid_use: bool,
    pub rheumatoid_arthritis: bool,
    /// Alcohol intake in units per day
    pub alcohol_units_per_day: Option<f64>,
    /// Femoral-neck bone density T-score
    pub t_score: Option<f64>,

    pub symptoms: SymptomScores,
}

impl PatientRiskProfile {
    /// BMI as supplied, or derived from height and weight.
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        self.bmi.or_else(|| match (self.height_cm, self.weight_kg) {
            (Some(h), Some(w)) => bmi_from(h, w),
            _ => None,
        })
    }

    /// Ethnicity with unspecified values mapped to the reference bucket.
    #[must_use]
    pub fn ethnicity_or_default(&self) -> Ethnicity {
        self.ethnicity.unwrap_or_default()
    }

    /// Genitourinary symptoms at or above the treatment threshold.
    #[must_use]
    pub fn has_genitourinary_symptoms(&self) -> bool {
        self.symptoms.genitourinary_severity() >= GU_SYMPTOM_THRESHOLD
    }

    /// Menopause before 45, or surgical menopause.
    #[must_use]
    pub fn early_or_surgical_menopause(&self) -> bool {
        self.hysterectomy || self.oophorectomy || self.age_at_menopause.is_some_and(|a| a < 45)
    }

    /// True when the caller supplied no information at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.without_defaulted_enums() == Self::default()
    }

    /// True when any demographic, measurement or history field was
    /// supplied. Symptom scores, the contraception flag and the defaulted
    /// enums do not count.
    #[must_use]
    pub fn has_clinical_data(&self) -> bool {
        let reduced = Self {
            symptoms: SymptomScores::default(),
            needs_contraception: false,
            ..self.without_defaulted_enums()
        };
        reduced != Self::default()
    }

    fn without_defaulted_enums(&self) -> Self {
        Self {
            sex: Sex::default(),
            menopausal_status: MenopausalStatus::default(),
            ..self.clone()
        }
    }

    /// Validate structural ranges of every supplied value.
    ///
    /// Values outside a calculator's validated range are not errors here;
    /// the calculator reports them as missing inputs instead.
    ///
    /// # Errors
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(age) = self.age {
            if age > 120 {
                errors.push(format!("Age {age} out of range [0, 120]"));
            }
        }

        let measurements = [
            ("height_cm", self.height_cm, 30.0, 250.0),
            ("weight_kg", self.weight_kg, 2.0, 400.0),
            ("bmi", self.bmi, 8.0, 100.0),
            ("systolic_bp", self.systolic_bp, 50.0, 300.0),
            ("total_cholesterol", self.total_cholesterol, 50.0, 600.0),
            ("hdl_cholesterol", self.hdl_cholesterol, 5.0, 200.0),
            ("alcohol_units_per_day", self.alcohol_units_per_day, 0.0, 50.0),
            ("t_score", self.t_score, -7.0, 7.0),
        ];
        for (name, value, lo, hi) in measurements {
            if let Some(v) = value {
                if !v.is_finite() || !(lo..=hi).contains(&v) {
                    errors.push(format!("{name} {v} out of range [{lo}, {hi}]"));
                }
            }
        }

        for (name, value) in self.symptoms.named() {
            if value > SymptomScores::MAX_SCORE {
                errors.push(format!("Symptom {name} score {value} exceeds {}", SymptomScores::MAX_SCORE));
            }
        }

        if let (Some(age), Some(menarche)) = (self.age, self.age_at_menarche) {
            if menarche > age {
                errors.push(format!("Age at menarche {menarche} is after current age {age}"));
            }
        }
        if let (Some(age), Some(birth)) = (self.age, self.age_at_first_birth) {
            if birth > age {
                errors.push(format!("Age at first birth {birth} is after current age {age}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Genitourinary severity that counts as symptomatic.
pub const GU_SYMPTOM_THRESHOLD: u8 = 5;

/// BMI in kg/m² from height (cm) and weight (kg).
#[must_use]
pub fn bmi_from(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 || !height_cm.is_finite() || !weight_kg.is_finite() {
        return None;
    }
    let metres = height_cm / 100.0;
    Some(weight_kg / (metres * metres))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_derived_from_height_and_weight() {
        let profile = PatientRiskProfile {
            height_cm: Some(165.0),
            weight_kg: Some(68.0),
            ..Default::default()
        };
        let bmi = profile.bmi().expect("bmi should derive");
        assert!((bmi - 24.977).abs() < 0.01);
    }

    #[test]
    fn test_explicit_bmi_wins() {
        let profile = PatientRiskProfile {
            height_cm: Some(165.0),
            weight_kg: Some(68.0),
            bmi: Some(31.0),
            ..Default::default()
        };
        assert_eq!(profile.bmi(), Some(31.0));
    }

    #[test]
    fn test_bmi_needs_both_measurements() {
        let profile = PatientRiskProfile {
            height_cm: Some(165.0),
            ..Default::default()
        };
        assert!(profile.bmi().is_none());
        assert!(bmi_from(0.0, 60.0).is_none());
    }

    #[test]
    fn test_genitourinary_threshold() {
        let mut profile = PatientRiskProfile::default();
        profile.symptoms.vaginal_dryness = 4;
        assert!(!profile.has_genitourinary_symptoms());
        profile.symptoms.urinary_symptoms = 5;
        assert!(profile.has_genitourinary_symptoms());
    }

    #[test]
    fn test_blank_profile_detection() {
        assert!(PatientRiskProfile::default().is_blank());

        let only_sex = PatientRiskProfile {
            sex: Sex::Male,
            ..Default::default()
        };
        assert!(only_sex.is_blank());

        let with_age = PatientRiskProfile {
            age: Some(52),
            ..Default::default()
        };
        assert!(!with_age.is_blank());

        let mut with_symptoms = PatientRiskProfile::default();
        with_symptoms.symptoms.hot_flushes = 7;
        assert!(!with_symptoms.is_blank());
    }

    #[test]
    fn test_clinical_data_detection() {
        let mut symptoms_only = PatientRiskProfile {
            sex: Sex::Female,
            menopausal_status: MenopausalStatus::Perimenopausal,
            needs_contraception: true,
            ..Default::default()
        };
        symptoms_only.symptoms.night_sweats = 8;
        assert!(!symptoms_only.has_clinical_data());

        let smoker = PatientRiskProfile {
            smoking: true,
            ..Default::default()
        };
        assert!(smoker.has_clinical_data());

        let labs_only = PatientRiskProfile {
            hdl_cholesterol: Some(48.0),
            ..Default::default()
        };
        assert!(labs_only.has_clinical_data());
    }

    #[test]
    fn test_validation() {
        let valid = PatientRiskProfile {
            age: Some(54),
            systolic_bp: Some(128.0),
            hdl_cholesterol: Some(55.0),
            age_at_menarche: Some(12),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let mut invalid = PatientRiskProfile {
            age: Some(40),
            systolic_bp: Some(f64::NAN),
            age_at_menarche: Some(45),
            ..Default::default()
        };
        invalid.symptoms.hot_flushes = 11;
        let errors = invalid.validate().expect_err("should reject");
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_deserialize_partial_profile() {
        let json = r#"{"age": 58, "smoking": true, "symptoms": {"hot_flushes": 8}}"#;
        let profile: PatientRiskProfile = serde_json::from_str(json).expect("should parse");
        assert_eq!(profile.age, Some(58));
        assert!(profile.smoking);
        assert_eq!(profile.symptoms.hot_flushes, 8);
        assert_eq!(profile.sex, Sex::Female);
        assert_eq!(profile.menopausal_status, MenopausalStatus::Postmenopausal);
    }
}
