//! Adapters layer: Concrete implementations of ports.
//!
//! - `builtin_rules`: compiled-in interaction table
//! - `json_rules`: interaction table from a JSON document

pub mod builtin_rules;
pub mod json_rules;

pub use builtin_rules::BuiltinRuleSource;
pub use json_rules::{parse_rules, JsonRuleSource};
