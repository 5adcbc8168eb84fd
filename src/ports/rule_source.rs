//! Rule source port: where the drug-interaction table comes from.
//!
//! The table is read once at start-up and frozen into an
//! [`InteractionTable`](crate::domain::InteractionTable); implementations are
//! never consulted per lookup.

use crate::domain::InteractionRecord;

/// Errors that can occur while loading interaction rules.
#[derive(Debug, thiserror::Error)]
pub enum RuleSourceError {
    #[error("Rule table unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rule table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rule table is empty")]
    Empty,
}

/// Supplier of raw interaction records.
pub trait InteractionRuleSource: Send + Sync {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Load every record. Per-record validation happens later, so a source
    /// may return records with missing fields.
    ///
    /// # Errors
    /// Returns error if the table cannot be read or parsed as a whole.
    fn load_rules(&self) -> Result<Vec<InteractionRecord>, RuleSourceError>;
}
