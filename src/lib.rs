#![forbid(unsafe_code)]

//! fieldcheck: declarative field validation
//!
//! A [`Form`] checks a record of input values against a list of field
//! declarations, each naming the rules its value must satisfy. Results are
//! collected into a per-field [`Report`] and announced to subscribers as
//! validation proceeds.

pub mod config;
pub mod engine;
pub mod error;
pub mod rules;
pub mod value;

// Re-export error types for convenient access
pub use error::{ConfigError, FormError, RuleError};

// Re-export the engine and rule types most callers need
pub use config::FormConfig;
pub use engine::{EventKind, FieldDecl, FieldResult, Form, FormEvent, Record, Report, RuleSpec};
pub use rules::{Rule, RuleRegistry, predicate, rule_fn};
