//! Drug-interaction rules and the in-memory lookup table.
//!
//! Rules arrive as loosely-typed records from a rule source. They are
//! validated once into an [`InteractionTable`]; lookups afterwards are exact
//! matches on the normalized (primary, concurrent) pair.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const NO_DATA_RATIONALE: &str = "No reliable interaction data available for this combination.";
pub const NO_DATA_ACTION: &str = "Consult a pharmacist or current prescribing reference before co-prescribing.";

/// Interaction severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Unknown,
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Parse a severity label, ignoring case. Unrecognized labels are `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Some(Self::High),
            "MODERATE" => Some(Self::Moderate),
            "LOW" => Some(Self::Low),
            "UNKNOWN" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Display colour for callers that render severities.
    #[must_use]
    pub fn display_color(&self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Moderate => "orange",
            Self::Low => "yellow",
            Self::Unknown => "gray",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Low => write!(f, "LOW"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Raw rule record as supplied by a rule source.
///
/// Every field is optional text so a partially filled external table can
/// still be deserialized; [`InteractionTable::from_records`] decides what
/// is usable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionRecord {
    pub primary: Option<String>,
    pub concurrent: Option<String>,
    pub severity: Option<String>,
    pub rationale: Option<String>,
    pub action: Option<String>,
}

impl InteractionRecord {
    #[must_use]
    pub fn new(primary: &str, concurrent: &str, severity: &str, rationale: &str, action: &str) -> Self {
        Self {
            primary: Some(primary.to_string()),
            concurrent: Some(concurrent.to_string()),
            severity: Some(severity.to_string()),
            rationale: Some(rationale.to_string()),
            action: Some(action.to_string()),
        }
    }
}

/// A validated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRule {
    pub primary: String,
    pub concurrent: String,
    pub severity: Severity,
    pub rationale: String,
    pub action: String,
}

/// Result of one pairwise lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionFinding {
    pub primary: String,
    pub concurrent: String,
    pub severity: Severity,
    pub rationale: String,
    pub action: String,
    /// False when no rule matched and the severity is the `UNKNOWN` sentinel
    pub matched: bool,
}

/// Why a record was rejected while building a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
}

/// Identifier normalization used for both indexing and lookup.
#[must_use]
pub fn normalize_id(id: &str) -> String {
    id.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Immutable, validated rule table keyed by the ordered (primary, concurrent)
/// pair.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    rules: HashMap<(String, String), InteractionRule>,
}

impl InteractionTable {
    /// An empty table; every lookup yields `UNKNOWN`.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table, keeping every valid record and reporting the rest.
    ///
    /// A record needs non-empty identifiers and a recognized severity. When
    /// the same pair appears twice, the first record wins.
    #[must_use]
    pub fn from_records(records: &[InteractionRecord]) -> (Self, Vec<RejectedRecord>) {
        let mut rules = HashMap::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let reject = |reason: &str| RejectedRecord {
                index,
                reason: reason.to_string(),
            };

            let Some(primary) = non_empty(record.primary.as_ref()) else {
                rejected.push(reject("missing primary agent"));
                continue;
            };
            let Some(concurrent) = non_empty(record.concurrent.as_ref()) else {
                rejected.push(reject("missing concurrent agent"));
                continue;
            };
            let Some(severity) = record.severity.as_deref().and_then(Severity::parse) else {
                rejected.push(reject("missing or unrecognized severity"));
                continue;
            };

            let key = (normalize_id(primary), normalize_id(concurrent));
            if rules.contains_key(&key) {
                rejected.push(reject("duplicate pair"));
                continue;
            }

            let rule = InteractionRule {
                primary: key.0.clone(),
                concurrent: key.1.clone(),
                severity,
                rationale: non_empty(record.rationale.as_ref())
                    .unwrap_or(NO_DATA_RATIONALE)
                    .to_string(),
                action: non_empty(record.action.as_ref())
                    .unwrap_or(NO_DATA_ACTION)
                    .to_string(),
            };
            rules.insert(key, rule);
        }

        (Self { rules }, rejected)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Exact lookup on the normalized pair. A miss yields `UNKNOWN`.
    #[must_use]
    pub fn lookup(&self, primary: &str, concurrent: &str) -> InteractionFinding {
        let key = (normalize_id(primary), normalize_id(concurrent));
        match self.rules.get(&key) {
            Some(rule) => InteractionFinding {
                primary: rule.primary.clone(),
                concurrent: rule.concurrent.clone(),
                severity: rule.severity,
                rationale: rule.rationale.clone(),
                action: rule.action.clone(),
                matched: true,
            },
            None => InteractionFinding {
                primary: key.0,
                concurrent: key.1,
                severity: Severity::Unknown,
                rationale: NO_DATA_RATIONALE.to_string(),
                action: NO_DATA_ACTION.to_string(),
                matched: false,
            },
        }
    }

    /// Rules sorted by primary then concurrent agent.
    #[must_use]
    pub fn rules(&self) -> Vec<&InteractionRule> {
        let mut rules: Vec<_> = self.rules.values().collect();
        rules.sort_by(|a, b| (&a.primary, &a.concurrent).cmp(&(&b.primary, &b.concurrent)));
        rules
    }
}
