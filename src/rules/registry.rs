#![forbid(unsafe_code)]

//! Rule registry mapping rule names to predicates
//!
//! The RuleRegistry is responsible for:
//! - Seeding the built-in rule set
//! - Registering and overriding rules at runtime
//! - Resolving the rule names fields refer to

use crate::error::RuleError;
use crate::rules::{BUILTIN_RULES, Rule};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Registry for storing and resolving rules by name
///
/// Rules are stored as shared trait objects, so cloning a registry is cheap
/// and yields an independent mapping: registering on the clone never changes
/// the original.
#[derive(Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty RuleRegistry
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Create a registry seeded with a fresh copy of the built-in rules
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (name, rule) in BUILTIN_RULES {
            registry.rules.insert((*name).to_string(), Arc::new(*rule));
        }
        registry
    }

    /// Insert or replace the rule registered under `name`
    ///
    /// Nothing about the rule is checked here; a broken rule only shows up
    /// when a field using it is validated.
    pub fn register(&mut self, name: impl Into<String>, rule: impl Rule + 'static) {
        let name = name.into();
        if self.rules.insert(name.clone(), Arc::new(rule)).is_some() {
            debug!(rule = %name, "overriding registered rule");
        }
    }

    /// Get a rule by its name
    ///
    /// Returns `None` if no rule is registered under `name`.
    pub fn get_rule(&self, name: &str) -> Option<&dyn Rule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    /// Resolve a rule by name, failing when it is not registered
    pub fn lookup(&self, name: &str) -> Result<&dyn Rule, RuleError> {
        self.get_rule(name)
            .ok_or_else(|| RuleError::NotFound(name.trim().to_string()))
    }

    /// Check whether a rule is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
