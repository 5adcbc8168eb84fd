//! JSON interaction table adapter.
//!
//! Accepts either a bare array of records or an object with a `rules` array:
//!
//! ```json
//! { "rules": [ { "primary": "estradiol_oral", "concurrent": "ssri",
//!                "severity": "LOW", "rationale": "...", "action": "..." } ] }
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::InteractionRecord;
use crate::ports::{InteractionRuleSource, RuleSourceError};

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    Bare(Vec<InteractionRecord>),
    Wrapped { rules: Vec<InteractionRecord> },
}

impl RuleDocument {
    fn into_records(self) -> Vec<InteractionRecord> {
        match self {
            Self::Bare(rules) | Self::Wrapped { rules } => rules,
        }
    }
}

/// Parse a rule document from text.
///
/// # Errors
/// Returns error if the text is not a rule document or holds no records.
pub fn parse_rules(text: &str) -> Result<Vec<InteractionRecord>, RuleSourceError> {
    let records = serde_json::from_str::<RuleDocument>(text)?.into_records();
    if records.is_empty() {
        return Err(RuleSourceError::Empty);
    }
    Ok(records)
}

#[derive(Debug, Clone)]
enum Origin {
    File(PathBuf),
    Inline(String),
}

/// Rule source reading a JSON document from a file or an in-memory string.
#[derive(Debug, Clone)]
pub struct JsonRuleSource {
    origin: Origin,
    name: String,
}

impl JsonRuleSource {
    /// Read the table from `path` when rules are loaded.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self {
            origin: Origin::File(path),
            name,
        }
    }

    #[must_use]
    pub fn from_json(text: impl Into<String>) -> Self {
        Self {
            origin: Origin::Inline(text.into()),
            name: "json:inline".to_string(),
        }
    }
}

impl InteractionRuleSource for JsonRuleSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_rules(&self) -> Result<Vec<InteractionRecord>, RuleSourceError> {
        match &self.origin {
            Origin::File(path) => parse_rules(&std::fs::read_to_string(path)?),
            Origin::Inline(text) => parse_rules(text),
        }
    }
}
