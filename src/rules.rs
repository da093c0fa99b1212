#![forbid(unsafe_code)]

//! Rule definitions and registry

mod builtin;
mod registry;
mod rule;

// Re-export core types
pub use builtin::{BUILTIN_RULES, BuiltinRule, EMAIL_MAX_LENGTH};
pub use registry::RuleRegistry;
pub use rule::{Rule, predicate, rule_fn};
