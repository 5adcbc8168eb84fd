//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the engine and its reference data.

mod rule_source;

pub use rule_source::{InteractionRuleSource, RuleSourceError};
