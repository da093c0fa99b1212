#![forbid(unsafe_code)]

//! Per-field results and the report that collects them

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Outcome of evaluating one field's rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldResult {
    /// False as soon as any evaluated rule failed
    pub valid: bool,

    /// Resolved value the rules were evaluated against (`None` if absent)
    pub value: Option<Value>,

    /// Names of rules that passed, in evaluation order
    pub succeeded: Vec<String>,

    /// Names of rules that failed, in evaluation order
    pub failed: Vec<String>,
}

impl FieldResult {
    /// Fresh result for a resolved value, before any rule ran
    pub fn new(value: Option<Value>) -> Self {
        Self {
            valid: true,
            value,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Record a rule outcome
    pub fn record(&mut self, rule: &str, passed: bool) {
        if passed {
            self.succeeded.push(rule.to_string());
        } else {
            self.failed.push(rule.to_string());
            self.valid = false;
        }
    }

    /// Number of rules evaluated
    pub fn evaluated(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Field results keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    fields: BTreeMap<String, FieldResult>,
}

impl Report {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a field result, replacing any earlier one for the same field
    pub fn insert(&mut self, name: impl Into<String>, result: FieldResult) {
        self.fields.insert(name.into(), result);
    }

    /// Result for a field, if it has been validated
    pub fn get(&self, name: &str) -> Option<&FieldResult> {
        self.fields.get(name)
    }

    /// Whether every field result in the report is valid
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|result| result.valid)
    }

    /// Names of fields whose result is invalid, sorted
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, result)| !result.valid)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate results sorted by field name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldResult)> {
        self.fields.iter().map(|(name, result)| (name.as_str(), result))
    }

    /// Number of field results
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field has been validated
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop all field results
    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
