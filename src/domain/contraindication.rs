//! Contraindication checklist for hormone therapy.

use serde::{Deserialize, Serialize};

use super::patient::PatientRiskProfile;

/// BMI above which obesity is flagged as a relative contraindication.
pub const SEVERE_OBESITY_BMI: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContraindicationType {
    /// Therapy should not be given
    Absolute,
    /// Therapy needs caution or monitoring
    Relative,
}

impl std::fmt::Display for ContraindicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContraindicationAlert {
    pub kind: ContraindicationType,
    pub condition: String,
    pub message: String,
    pub recommended_action: String,
}

impl ContraindicationAlert {
    fn new(kind: ContraindicationType, condition: &str, message: &str, action: &str) -> Self {
        Self {
            kind,
            condition: condition.to_string(),
            message: message.to_string(),
            recommended_action: action.to_string(),
        }
    }
}

struct Check {
    kind: ContraindicationType,
    condition: &'static str,
    message: &'static str,
    action: &'static str,
    fires: fn(&PatientRiskProfile) -> bool,
}

// Absolute checks first; order is part of the output contract.
const CHECKS: [Check; 8] = [
    Check {
        kind: ContraindicationType::Absolute,
        condition: "Personal History of Breast Cancer",
        message: "Systemic hormone therapy may stimulate recurrence of hormone-sensitive breast cancer.",
        action: "Avoid systemic hormone therapy; consider non-hormonal options and oncology input.",
        fires: |p| p.personal_history_breast_cancer,
    },
    Check {
        kind: ContraindicationType::Absolute,
        condition: "Personal History of DVT/VTE",
        message: "Prior venous thromboembolism markedly increases recurrence risk on oral estrogen.",
        action: "Avoid oral estrogen; specialist review before any systemic therapy.",
        fires: |p| p.personal_history_dvt,
    },
    Check {
        kind: ContraindicationType::Absolute,
        condition: "Thrombophilia",
        message: "Inherited or acquired thrombophilia increases thrombotic risk with estrogen.",
        action: "Avoid systemic estrogen; refer to haematology.",
        fires: |p| p.thrombophilia,
    },
    Check {
        kind: ContraindicationType::Relative,
        condition: "Family History of Breast Cancer",
        message: "Family history increases baseline breast cancer risk.",
        action: "Discuss risk, ensure breast screening is up to date, use lowest effective dose.",
        fires: |p| p.family_history_breast_cancer,
    },
    Check {
        kind: ContraindicationType::Relative,
        condition: "Severe Obesity (BMI > 35)",
        message: "Severe obesity increases VTE risk, particularly with oral estrogen.",
        action: "Prefer transdermal estrogen and support weight management.",
        fires: |p| p.bmi().is_some_and(|b| b > SEVERE_OBESITY_BMI),
    },
    Check {
        kind: ContraindicationType::Relative,
        condition: "Smoking",
        message: "Smoking increases cardiovascular and thrombotic risk.",
        action: "Recommend smoking cessation; prefer transdermal route.",
        fires: |p| p.smoking,
    },
    Check {
        kind: ContraindicationType::Relative,
        condition: "Hypertension",
        message: "Uncontrolled hypertension increases cardiovascular risk.",
        action: "Ensure blood pressure is controlled before starting; monitor regularly.",
        fires: |p| p.hypertension,
    },
    Check {
        kind: ContraindicationType::Relative,
        condition: "Diabetes",
        message: "Diabetes increases cardiovascular risk.",
        action: "Optimise glycaemic control; prefer transdermal route.",
        fires: |p| p.diabetes,
    },
];

/// Run every check in order. Each check that fires adds exactly one alert.
#[must_use]
pub fn check_contraindications(profile: &PatientRiskProfile) -> Vec<ContraindicationAlert> {
    CHECKS
        .iter()
        .filter(|check| (check.fires)(profile))
        .map(|check| ContraindicationAlert::new(check.kind, check.condition, check.message, check.action))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_alerts_for_clean_profile() {
        assert!(check_contraindications(&PatientRiskProfile::default()).is_empty());
    }

    #[test]
    fn test_breast_cancer_history_is_absolute() {
        let profile = PatientRiskProfile {
            personal_history_breast_cancer: true,
            family_history_breast_cancer: true,
            ..Default::default()
        };
        let alerts = check_contraindications(&profile);
        let absolute: Vec<_> = alerts
            .iter()
            .filter(|a| a.kind == ContraindicationType::Absolute)
            .collect();
        assert_eq!(absolute.len(), 1);
        assert!(absolute[0].condition.contains("Breast Cancer"));
        assert_eq!(alerts.len(), 2);
    }

    #[test]
    fn test_absolute_checks_come_first() {
        let profile = PatientRiskProfile {
            smoking: true,
            diabetes: true,
            thrombophilia: true,
            personal_history_dvt: true,
            ..Default::default()
        };
        let alerts = check_contraindications(&profile);
        let kinds: Vec<_> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContraindicationType::Absolute,
                ContraindicationType::Absolute,
                ContraindicationType::Relative,
                ContraindicationType::Relative,
            ]
        );
        assert_eq!(alerts[0].condition, "Personal History of DVT/VTE");
        assert_eq!(alerts[3].condition, "Diabetes");
    }

    #[test]
    fn test_severe_obesity_is_strictly_above_threshold() {
        let at_threshold = PatientRiskProfile {
            bmi: Some(35.0),
            ..Default::default()
        };
        assert!(check_contraindications(&at_threshold).is_empty());

        let derived = PatientRiskProfile {
            height_cm: Some(160.0),
            weight_kg: Some(95.0),
            ..Default::default()
        };
        let alerts = check_contraindications(&derived);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, ContraindicationType::Relative);
    }
}
