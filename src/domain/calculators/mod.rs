//! Risk calculator library.
//!
//! Six independent calculators, each a pure function of the profile. The
//! legacy and simplified variants are deliberately kept apart from the
//! primary algorithms; they are expected to disagree.

mod ascvd;
mod breast_simplified;
mod framingham;
mod frax;
mod gail;
mod wells;

pub use ascvd::AscvdCalculator;
pub use breast_simplified::SimplifiedBreastCancerCalculator;
pub use framingham::FraminghamCalculator;
pub use frax::FraxCalculator;
pub use gail::GailCalculator;
pub use wells::WellsCalculator;

use super::patient::PatientRiskProfile;
use super::risk::{CalculatorKind, RiskResult};

/// A single risk algorithm.
pub trait RiskCalculator: Send + Sync {
    fn kind(&self) -> CalculatorKind;

    /// Compute the result. Never fails; missing inputs produce the
    /// "not computed" sentinel.
    fn calculate(&self, profile: &PatientRiskProfile) -> RiskResult;
}

/// Collects the names of required inputs that are absent or out of range.
#[derive(Debug, Default)]
pub(crate) struct RequiredInputs {
    missing: Vec<String>,
}

impl RequiredInputs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn require<T: Copy>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name.to_string());
        }
        value
    }

    /// Age must be present and inside the validated range.
    pub(crate) fn require_age(&mut self, age: Option<u32>, min: u32, max: u32) -> Option<u32> {
        match age {
            Some(a) if (min..=max).contains(&a) => Some(a),
            _ => {
                self.missing.push(format!("age ({min}-{max})"));
                None
            }
        }
    }

    pub(crate) fn into_missing(self) -> Vec<String> {
        self.missing
    }
}

/// Round to two decimals for stable presentation of percentages.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_inputs_collects_all_missing() {
        let mut req = RequiredInputs::new();
        assert_eq!(req.require_age(Some(30), 40, 79), None);
        assert_eq!(req.require::<f64>("systolic_bp", None), None);
        assert_eq!(req.require("hdl_cholesterol", Some(50.0)), Some(50.0));

        assert_eq!(req.into_missing(), vec!["age (40-79)".to_string(), "systolic_bp".to_string()]);
    }

    #[test]
    fn test_required_inputs_ok() {
        let mut req = RequiredInputs::new();
        assert_eq!(req.require_age(Some(55), 40, 79), Some(55));
        assert!(req.into_missing().is_empty());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.05222), 2.05);
        assert_eq!(round2(7.499), 7.5);
    }
}
