//! Hormone therapy recommendation decision tree.
//!
//! A strictly ordered chain over categorized risk levels: breast cancer risk
//! takes precedence over cardiovascular risk, which takes precedence over
//! VTE risk. The tree reads levels only, never raw scores.

use serde::{Deserialize, Serialize};

use super::patient::PatientRiskProfile;
use super::risk::RiskLevel;

/// Follow-up reviews in months after starting or changing therapy.
pub const FOLLOW_UP_MONTHS: [u32; 3] = [1, 6, 12];

/// Fixed rationale lines. Callers and clinicians match on these verbatim.
pub mod rationale {
    pub const BREAST_HIGH: &str =
        "High breast cancer risk: systemic hormone therapy is not recommended.";
    pub const BREAST_HIGH_GU: &str =
        "Genitourinary symptoms present: low-dose vaginal estrogen may be considered after specialist review.";
    pub const BREAST_HIGH_NON_HORMONAL: &str =
        "Consider non-hormonal alternatives for symptom relief.";

    pub const CARDIOVASCULAR_HIGH: &str =
        "High cardiovascular risk: systemic estrogen exposure should be limited.";
    pub const VTE_HIGH: &str = "High VTE risk: systemic estrogen exposure should be limited.";
    pub const MODERATE_RISK: &str =
        "Moderate cardiovascular or VTE risk: route of administration must be chosen carefully.";
    pub const ALL_LOW: &str = "All assessed risks low: full systemic options are available.";

    pub const VAGINAL_ONLY: &str =
        "Vaginal-only estrogen selected to treat local symptoms with minimal systemic absorption.";
    pub const TRANSDERMAL: &str =
        "Transdermal route selected to avoid first-pass hepatic effects on clotting and lipids.";
    pub const ORAL: &str = "Oral route acceptable.";

    pub const ESTROGEN_ONLY: &str = "Hysterectomy: estrogen-only therapy, no progestogen required.";
    pub const PROGESTOGEN_IUS: &str =
        "Intact uterus and contraception needed: levonorgestrel IUS for endometrial protection.";
    pub const PROGESTOGEN_MICRONIZED: &str =
        "Intact uterus: micronized progesterone for endometrial protection.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TherapyType {
    /// Estrogen-only
    #[serde(rename = "ET")]
    EstrogenOnly,
    /// Estrogen plus progestogen
    #[serde(rename = "EPT")]
    EstrogenProgestogen,
    #[serde(rename = "vaginal_only")]
    VaginalOnly,
    #[serde(rename = "not_recommended")]
    NotRecommended,
}

impl std::fmt::Display for TherapyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EstrogenOnly => write!(f, "ET"),
            Self::EstrogenProgestogen => write!(f, "EPT"),
            Self::VaginalOnly => write!(f, "Vaginal-only"),
            Self::NotRecommended => write!(f, "Not recommended"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Oral,
    Transdermal,
    Vaginal,
    None,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oral => write!(f, "oral"),
            Self::Transdermal => write!(f, "transdermal"),
            Self::Vaginal => write!(f, "vaginal"),
            Self::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgestogenType {
    Micronized,
    /// Levonorgestrel intrauterine system
    Ius,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentRecommendation {
    pub therapy: TherapyType,
    pub route: Route,
    pub progestogen: Option<ProgestogenType>,
    /// One line per rule that fired, in evaluation order
    pub rationale: Vec<String>,
    pub follow_up_months: Vec<u32>,
}

/// Categorized inputs to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentInputs {
    pub breast: RiskLevel,
    pub cardiovascular: RiskLevel,
    pub vte: RiskLevel,
    pub hysterectomy: bool,
    pub genitourinary_symptoms: bool,
    pub needs_contraception: bool,
}

impl TreatmentInputs {
    /// Combine risk levels with the profile facts the tree reads.
    #[must_use]
    pub fn from_profile(
        profile: &PatientRiskProfile,
        breast: RiskLevel,
        cardiovascular: RiskLevel,
        vte: RiskLevel,
    ) -> Self {
        Self {
            breast,
            cardiovascular,
            vte,
            hysterectomy: profile.hysterectomy,
            genitourinary_symptoms: profile.has_genitourinary_symptoms(),
            needs_contraception: profile.needs_contraception,
        }
    }
}

struct Builder {
    rationale: Vec<String>,
}

impl Builder {
    fn new() -> Self {
        Self {
            rationale: Vec::new(),
        }
    }

    fn fired(&mut self, line: &str) {
        self.rationale.push(line.to_string());
    }

    fn finish(
        self,
        therapy: TherapyType,
        route: Route,
        progestogen: Option<ProgestogenType>,
    ) -> TreatmentRecommendation {
        TreatmentRecommendation {
            therapy,
            route,
            progestogen,
            rationale: self.rationale,
            follow_up_months: FOLLOW_UP_MONTHS.to_vec(),
        }
    }

    fn vaginal_only(mut self) -> TreatmentRecommendation {
        self.fired(rationale::VAGINAL_ONLY);
        self.finish(TherapyType::VaginalOnly, Route::Vaginal, None)
    }

    /// ET when the uterus is absent, otherwise EPT with the progestogen
    /// chosen by contraception need.
    fn systemic(mut self, inputs: &TreatmentInputs, route: Route) -> TreatmentRecommendation {
        self.fired(match route {
            Route::Oral => rationale::ORAL,
            _ => rationale::TRANSDERMAL,
        });
        if inputs.hysterectomy {
            self.fired(rationale::ESTROGEN_ONLY);
            return self.finish(TherapyType::EstrogenOnly, route, None);
        }
        let progestogen = if inputs.needs_contraception {
            self.fired(rationale::PROGESTOGEN_IUS);
            ProgestogenType::Ius
        } else {
            self.fired(rationale::PROGESTOGEN_MICRONIZED);
            ProgestogenType::Micronized
        };
        self.finish(TherapyType::EstrogenProgestogen, route, Some(progestogen))
    }

    /// Shared branch for a single High risk: `other` is the remaining one of
    /// cardiovascular/VTE.
    fn restricted(self, inputs: &TreatmentInputs, other: RiskLevel) -> TreatmentRecommendation {
        if inputs.genitourinary_symptoms || other >= RiskLevel::Moderate {
            self.vaginal_only()
        } else {
            self.systemic(inputs, Route::Transdermal)
        }
    }
}

/// Run the decision tree.
#[must_use]
pub fn recommend(inputs: &TreatmentInputs) -> TreatmentRecommendation {
    let mut b = Builder::new();

    if inputs.breast == RiskLevel::High {
        b.fired(rationale::BREAST_HIGH);
        b.fired(if inputs.genitourinary_symptoms {
            rationale::BREAST_HIGH_GU
        } else {
            rationale::BREAST_HIGH_NON_HORMONAL
        });
        return b.finish(TherapyType::NotRecommended, Route::None, None);
    }

    if inputs.cardiovascular == RiskLevel::High {
        b.fired(rationale::CARDIOVASCULAR_HIGH);
        return b.restricted(inputs, inputs.vte);
    }

    if inputs.vte == RiskLevel::High {
        b.fired(rationale::VTE_HIGH);
        return b.restricted(inputs, inputs.cardiovascular);
    }

    if inputs.cardiovascular == RiskLevel::Moderate || inputs.vte == RiskLevel::Moderate {
        b.fired(rationale::MODERATE_RISK);
        let both_moderate =
            inputs.cardiovascular == RiskLevel::Moderate && inputs.vte == RiskLevel::Moderate;
        if both_moderate && inputs.genitourinary_symptoms {
            return b.vaginal_only();
        }
        return b.systemic(inputs, Route::Transdermal);
    }

    b.fired(rationale::ALL_LOW);
    b.systemic(inputs, Route::Oral)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(breast: RiskLevel, cardiovascular: RiskLevel, vte: RiskLevel) -> TreatmentInputs {
        TreatmentInputs {
            breast,
            cardiovascular,
            vte,
            hysterectomy: false,
            genitourinary_symptoms: false,
            needs_contraception: false,
        }
    }

    use RiskLevel::{High, Low, Moderate};

    #[test]
    fn test_breast_high_takes_precedence() {
        let rec = recommend(&inputs(High, High, High));
        assert_eq!(rec.therapy, TherapyType::NotRecommended);
        assert_eq!(rec.route, Route::None);
        assert_eq!(rec.progestogen, None);
        assert_eq!(
            rec.rationale,
            vec![rationale::BREAST_HIGH, rationale::BREAST_HIGH_NON_HORMONAL]
        );
    }

    #[test]
    fn test_breast_high_with_gu_symptoms_mentions_vaginal_option() {
        let mut i = inputs(High, Low, Low);
        i.genitourinary_symptoms = true;
        let rec = recommend(&i);
        assert_eq!(rec.therapy, TherapyType::NotRecommended);
        assert_eq!(rec.rationale[1], rationale::BREAST_HIGH_GU);
    }

    #[test]
    fn test_hysterectomy_all_low_is_oral_et() {
        let mut i = inputs(Low, Low, Low);
        i.hysterectomy = true;
        let rec = recommend(&i);
        assert_eq!(rec.therapy, TherapyType::EstrogenOnly);
        assert_eq!(rec.route, Route::Oral);
        assert_eq!(rec.progestogen, None);
        assert_eq!(
            rec.rationale,
            vec![rationale::ALL_LOW, rationale::ORAL, rationale::ESTROGEN_ONLY]
        );
    }

    #[test]
    fn test_intact_uterus_progestogen_choice() {
        let rec = recommend(&inputs(Low, Low, Low));
        assert_eq!(rec.therapy, TherapyType::EstrogenProgestogen);
        assert_eq!(rec.progestogen, Some(ProgestogenType::Micronized));

        let mut i = inputs(Low, Low, Low);
        i.needs_contraception = true;
        assert_eq!(recommend(&i).progestogen, Some(ProgestogenType::Ius));
    }

    #[test]
    fn test_cardiovascular_high_alone_is_transdermal() {
        let rec = recommend(&inputs(Moderate, High, Low));
        assert_eq!(rec.therapy, TherapyType::EstrogenProgestogen);
        assert_eq!(rec.route, Route::Transdermal);
        assert_eq!(rec.rationale[0], rationale::CARDIOVASCULAR_HIGH);
        assert_eq!(rec.rationale[1], rationale::TRANSDERMAL);
    }

    #[test]
    fn test_cardiovascular_high_with_vte_moderate_is_vaginal() {
        let rec = recommend(&inputs(Low, High, Moderate));
        assert_eq!(rec.therapy, TherapyType::VaginalOnly);
        assert_eq!(rec.route, Route::Vaginal);
        assert_eq!(
            rec.rationale,
            vec![rationale::CARDIOVASCULAR_HIGH, rationale::VAGINAL_ONLY]
        );
    }

    #[test]
    fn test_cardiovascular_high_with_gu_is_vaginal() {
        let mut i = inputs(Low, High, Low);
        i.genitourinary_symptoms = true;
        assert_eq!(recommend(&i).therapy, TherapyType::VaginalOnly);
    }

    #[test]
    fn test_vte_high_mirrors_cardiovascular() {
        let rec = recommend(&inputs(Low, Low, High));
        assert_eq!(rec.route, Route::Transdermal);
        assert_eq!(rec.rationale[0], rationale::VTE_HIGH);

        let rec = recommend(&inputs(Low, Moderate, High));
        assert_eq!(rec.therapy, TherapyType::VaginalOnly);
    }

    #[test]
    fn test_moderate_branch() {
        let rec = recommend(&inputs(Low, Moderate, Low));
        assert_eq!(rec.route, Route::Transdermal);
        assert_eq!(rec.rationale[0], rationale::MODERATE_RISK);

        // both moderate without GU symptoms stays systemic
        let rec = recommend(&inputs(Low, Moderate, Moderate));
        assert_eq!(rec.therapy, TherapyType::EstrogenProgestogen);

        let mut i = inputs(Low, Moderate, Moderate);
        i.genitourinary_symptoms = true;
        assert_eq!(recommend(&i).therapy, TherapyType::VaginalOnly);
    }

    #[test]
    fn test_follow_up_is_unconditional() {
        for i in [inputs(High, Low, Low), inputs(Low, High, Moderate), inputs(Low, Low, Low)] {
            assert_eq!(recommend(&i).follow_up_months, vec![1, 6, 12]);
        }
    }

    #[test]
    fn test_from_profile_reads_facts() {
        let mut profile = PatientRiskProfile {
            hysterectomy: true,
            needs_contraception: true,
            ..Default::default()
        };
        profile.symptoms.urinary_symptoms = 6;
        let i = TreatmentInputs::from_profile(&profile, Low, Moderate, Low);
        assert!(i.hysterectomy);
        assert!(i.genitourinary_symptoms);
        assert!(i.needs_contraception);
        assert_eq!(i.cardiovascular, Moderate);
    }
}
