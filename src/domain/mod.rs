//! Domain layer: clinical types, risk algorithms and decision logic.
//!
//! Everything here is pure: no I/O, no shared state. All types are
//! serializable and inputs are validated before use.

mod assessment;
pub mod baseline;
pub mod calculators;
mod contraindication;
mod interaction;
mod patient;
mod risk;
pub mod treatment;

pub use assessment::{AppliedDefault, ComprehensiveAssessmentResult};
pub use calculators::RiskCalculator;
pub use contraindication::{
    check_contraindications, ContraindicationAlert, ContraindicationType, SEVERE_OBESITY_BMI,
};
pub use interaction::{
    normalize_id, InteractionFinding, InteractionRecord, InteractionRule, InteractionTable,
    RejectedRecord, Severity, NO_DATA_ACTION, NO_DATA_RATIONALE,
};
pub use patient::{
    bmi_from, Ethnicity, MenopausalStatus, PatientRiskProfile, Sex, SymptomScores,
    GU_SYMPTOM_THRESHOLD,
};
pub use risk::{CalculatorKind, RiskCategory, RiskLevel, RiskResult};
pub use treatment::{
    recommend, ProgestogenType, Route, TherapyType, TreatmentInputs, TreatmentRecommendation,
};
