//! Baked-in interaction table.
//!
//! Primary agents are the hormone therapy preparations the decision tree can
//! recommend; concurrent agents are drug classes.

use crate::domain::InteractionRecord;
use crate::ports::{InteractionRuleSource, RuleSourceError};

/// (primary, concurrent, severity, rationale, action)
type Row = (&'static str, &'static str, &'static str, &'static str, &'static str);

const RULES: &[Row] = &[
    (
        "estradiol_oral",
        "anticoagulants",
        "HIGH",
        "Oral estrogen increases hepatic synthesis of clotting factors and may alter anticoagulant effect.",
        "Prefer transdermal estradiol; if oral is used, monitor INR closely after starting.",
    ),
    (
        "estradiol_oral",
        "cyp3a4_inducers",
        "MODERATE",
        "Enzyme inducers (e.g. carbamazepine, rifampicin, St John's wort) reduce estrogen exposure.",
        "Consider a non-oral route or dose adjustment; review symptom control.",
    ),
    (
        "estradiol_oral",
        "lamotrigine",
        "HIGH",
        "Estrogen induces lamotrigine glucuronidation and can lower seizure control.",
        "Monitor lamotrigine levels and seizure frequency; adjust dose with neurology.",
    ),
    (
        "estradiol_oral",
        "levothyroxine",
        "MODERATE",
        "Oral estrogen raises thyroxine-binding globulin, reducing free thyroxine.",
        "Recheck TSH 6-8 weeks after starting oral estrogen.",
    ),
    (
        "estradiol_oral",
        "tamoxifen",
        "HIGH",
        "Systemic estrogen opposes the action of tamoxifen.",
        "Avoid combination; discuss non-hormonal options with oncology.",
    ),
    (
        "estradiol_oral",
        "ssri",
        "LOW",
        "No clinically significant pharmacokinetic interaction expected.",
        "No action required beyond routine review.",
    ),
    (
        "estradiol_transdermal",
        "anticoagulants",
        "LOW",
        "Transdermal estradiol has minimal effect on hepatic clotting factor synthesis.",
        "Routine INR monitoring.",
    ),
    (
        "estradiol_transdermal",
        "cyp3a4_inducers",
        "LOW",
        "Transdermal route avoids first-pass metabolism; induction effect is small.",
        "Review symptom control after starting the inducer.",
    ),
    (
        "estradiol_transdermal",
        "lamotrigine",
        "MODERATE",
        "Systemic estrogen may still reduce lamotrigine levels.",
        "Monitor lamotrigine levels after starting.",
    ),
    (
        "estradiol_transdermal",
        "levothyroxine",
        "LOW",
        "Minimal effect on thyroxine-binding globulin with transdermal delivery.",
        "No action required beyond routine thyroid monitoring.",
    ),
    (
        "estradiol_transdermal",
        "tamoxifen",
        "HIGH",
        "Systemic estrogen opposes the action of tamoxifen.",
        "Avoid combination; discuss non-hormonal options with oncology.",
    ),
    (
        "estradiol_vaginal",
        "tamoxifen",
        "MODERATE",
        "Low-dose vaginal estrogen has limited absorption but is not risk-free with tamoxifen.",
        "Use only after oncology review, at the lowest effective dose.",
    ),
    (
        "estradiol_vaginal",
        "aromatase_inhibitors",
        "HIGH",
        "Even small systemic estrogen absorption may counteract aromatase inhibition.",
        "Avoid unless oncology agrees; prefer non-hormonal lubricants and moisturisers.",
    ),
    (
        "estradiol_vaginal",
        "anticoagulants",
        "LOW",
        "Negligible systemic absorption at standard doses.",
        "No action required.",
    ),
    (
        "micronized_progesterone",
        "cyp3a4_inducers",
        "MODERATE",
        "Enzyme inducers reduce progesterone exposure and may compromise endometrial protection.",
        "Consider the levonorgestrel IUS for endometrial protection.",
    ),
    (
        "micronized_progesterone",
        "cyp3a4_inhibitors",
        "MODERATE",
        "Strong inhibitors (e.g. ketoconazole, clarithromycin) increase progesterone exposure and sedation.",
        "Counsel about drowsiness; take at bedtime.",
    ),
    (
        "micronized_progesterone",
        "benzodiazepines",
        "MODERATE",
        "Additive sedation with progesterone taken at night.",
        "Counsel about drowsiness; avoid driving if affected.",
    ),
    (
        "levonorgestrel_ius",
        "cyp3a4_inducers",
        "LOW",
        "Local intrauterine action is largely unaffected by enzyme induction.",
        "No action required.",
    ),
    (
        "tibolone",
        "anticoagulants",
        "HIGH",
        "Tibolone increases fibrinolytic activity and may potentiate anticoagulants.",
        "Avoid or monitor INR closely with dose review.",
    ),
    (
        "tibolone",
        "cyp3a4_inducers",
        "MODERATE",
        "Enzyme inducers increase tibolone metabolism and may reduce efficacy.",
        "Review symptom control.",
    ),
];

/// Rule source backed by the compiled-in table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRuleSource;

impl BuiltinRuleSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl InteractionRuleSource for BuiltinRuleSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn load_rules(&self) -> Result<Vec<InteractionRecord>, RuleSourceError> {
        Ok(RULES
            .iter()
            .map(|&(primary, concurrent, severity, rationale, action)| {
                InteractionRecord::new(primary, concurrent, severity, rationale, action)
            })
            .collect())
    }
}
