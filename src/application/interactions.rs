//! Interaction service: loads the rule table once and answers lookups.

use crate::domain::{InteractionFinding, InteractionTable, Severity};
use crate::ports::InteractionRuleSource;

/// Pairwise drug-interaction checker over a frozen rule table.
///
/// Construction never fails: an unreadable or empty source leaves an empty
/// table, and every lookup then reports `UNKNOWN`.
#[derive(Debug, Clone, Default)]
pub struct InteractionChecker {
    table: InteractionTable,
}

impl InteractionChecker {
    /// Load and validate rules from `source`.
    pub fn from_source<S: InteractionRuleSource + ?Sized>(source: &S) -> Self {
        let records = match source.load_rules() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    source = source.name(),
                    error = %e,
                    "Interaction rules unavailable, all lookups will report UNKNOWN"
                );
                return Self::default();
            }
        };

        let (table, rejected) = InteractionTable::from_records(&records);
        for r in &rejected {
            tracing::warn!(
                source = source.name(),
                record = r.index,
                reason = %r.reason,
                "Skipping interaction rule"
            );
        }
        tracing::info!(
            source = source.name(),
            loaded = table.len(),
            skipped = rejected.len(),
            "Interaction rules loaded"
        );

        Self { table }
    }

    #[must_use]
    pub fn with_table(table: InteractionTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &InteractionTable {
        &self.table
    }

    /// Look up one (primary, concurrent) pair.
    #[must_use]
    pub fn check(&self, primary: &str, concurrent: &str) -> InteractionFinding {
        self.table.lookup(primary, concurrent)
    }

    /// Check a primary agent against every concurrent medication, in the
    /// order given.
    #[must_use]
    pub fn check_regimen<I, T>(&self, primary: &str, concurrents: I) -> Vec<InteractionFinding>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        concurrents
            .into_iter()
            .map(|c| self.check(primary, c.as_ref()))
            .collect()
    }
}

/// Worst severity among `findings`; `UNKNOWN` outranks nothing but an empty
/// list.
#[must_use]
pub fn highest_severity(findings: &[InteractionFinding]) -> Option<Severity> {
    findings.iter().map(|f| f.severity).max()
}
