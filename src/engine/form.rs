#![forbid(unsafe_code)]

//! Validation engine
//!
//! A [`Form`] owns its field declarations, a private copy of the rule
//! registry, the report of the current pass, and the subscribers notified
//! as fields and whole-form passes finish.

use crate::config::FormConfig;
use crate::engine::events::Subscribers;
use crate::engine::{EventKind, FieldDecl, FieldResult, FormEvent, Report};
use crate::error::{ConfigError, FormError, RuleError};
use crate::rules::{Rule, RuleRegistry};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

/// Input values keyed by field name
pub type Record = Map<String, Value>;

/// Validation engine for a list of field declarations
#[derive(Debug)]
pub struct Form {
    fields: Vec<FieldDecl>,
    registry: RuleRegistry,
    report: Report,
    valid: bool,
    subscribers: Subscribers,
}

impl Form {
    /// Create a form using a fresh copy of the built-in rules
    pub fn new(fields: Vec<FieldDecl>) -> Self {
        Self::with_registry(fields, RuleRegistry::with_defaults())
    }

    /// Create a form using the given registry
    ///
    /// The form keeps its own registry; later changes to either side are
    /// not shared. Field names are expected to be unique; see
    /// [`Form::check_configuration`].
    pub fn with_registry(fields: Vec<FieldDecl>, registry: RuleRegistry) -> Self {
        Self {
            fields,
            registry,
            report: Report::new(),
            valid: true,
            subscribers: Subscribers::default(),
        }
    }

    /// Create a form from a parsed form definition
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.fields.clone())
    }

    /// Register or override a rule for this form only
    pub fn add_validator(
        &mut self,
        name: impl Into<String>,
        rule: impl Rule + 'static,
    ) -> &mut Self {
        self.registry.register(name, rule);
        self
    }

    /// Subscribe to one kind of event
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> &mut Self
    where
        F: FnMut(&FormEvent<'_>) + 'static,
    {
        self.subscribers.add(Some(kind), Box::new(callback));
        self
    }

    /// Subscribe to every event
    pub fn subscribe<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&FormEvent<'_>) + 'static,
    {
        self.subscribers.add(None, Box::new(callback));
        self
    }

    /// Validate a single field and record its result
    ///
    /// The field's declared literal value, when present, takes precedence
    /// over `value`. With `continue_on_fail` false only the first declared
    /// rule is evaluated, whatever its outcome; otherwise every rule runs.
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownField` if no field is declared under
    /// `name`, and `FormError::Rule` if a rule cannot be resolved or fails
    /// to evaluate. On error the report is left unchanged for this field.
    pub fn validate_field(
        &mut self,
        name: &str,
        value: Option<Value>,
        continue_on_fail: bool,
    ) -> Result<&mut Self, FormError> {
        let index = self
            .fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        self.validate_declaration(index, value, continue_on_fail)?;
        Ok(self)
    }

    fn validate_declaration(
        &mut self,
        index: usize,
        value: Option<Value>,
        continue_on_fail: bool,
    ) -> Result<(), FormError> {
        let result = evaluate(&self.registry, &self.fields[index], value, continue_on_fail)?;
        if !result.valid {
            self.valid = false;
        }

        let Self {
            fields,
            report,
            subscribers,
            ..
        } = &mut *self;
        let name = fields[index].name.as_str();
        report.insert(name, result);
        if let Some(result) = report.get(name) {
            subscribers.emit(&FormEvent::field(name, result));
        }

        Ok(())
    }

    /// Validate every declared field against `record`
    ///
    /// Starts a fresh report, validates fields in declaration order, then
    /// raises `valid` or `invalid` with the full report.
    ///
    /// # Errors
    ///
    /// The first fatal error aborts the pass; later fields are not validated
    /// and no whole-form event is raised.
    pub fn validate(
        &mut self,
        record: &Record,
        continue_on_fail: bool,
    ) -> Result<&mut Self, FormError> {
        self.report.clear();
        self.valid = true;

        for index in 0..self.fields.len() {
            let value = record.get(&self.fields[index].name).cloned();
            self.validate_declaration(index, value, continue_on_fail)?;
        }

        debug!(
            fields = self.report.len(),
            valid = self.valid,
            "form validated"
        );

        let Self {
            report,
            subscribers,
            valid,
            ..
        } = &mut *self;
        subscribers.emit(&FormEvent::form(*valid, report));

        Ok(self)
    }

    /// Evaluate every declared field against `record` without touching the
    /// form's report or raising events
    pub fn check(&self, record: &Record, continue_on_fail: bool) -> Result<Report, FormError> {
        let mut report = Report::new();
        for field in &self.fields {
            let value = record.get(&field.name).cloned();
            let result = evaluate(&self.registry, field, value, continue_on_fail)?;
            report.insert(field.name.clone(), result);
        }
        Ok(report)
    }

    /// Verify that field names are unique and every rule referenced by a
    /// field is registered
    ///
    /// # Errors
    ///
    /// Returns `FormError::Config(ConfigError::Validation)` for the first
    /// repeated field name, and `FormError::Rule(RuleError::NotFound)` for
    /// the first missing rule in declaration order.
    pub fn check_configuration(&self) -> Result<(), FormError> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(
                    ConfigError::Validation(format!("Duplicate field '{}'", field.name)).into(),
                );
            }
            for rule in field.rule_names() {
                if !self.registry.contains(rule) {
                    return Err(RuleError::NotFound(rule.trim().to_string()).into());
                }
            }
        }
        Ok(())
    }

    /// Report accumulated since the last whole-form pass
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// False once any field validated since the last whole-form pass failed
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Declared fields, in declaration order
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Declaration of the named field
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Rules available to this form
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }
}

/// Evaluate one field's rules against its resolved value
fn evaluate(
    registry: &RuleRegistry,
    field: &FieldDecl,
    value: Option<Value>,
    continue_on_fail: bool,
) -> Result<FieldResult, FormError> {
    let resolved = field.value.clone().or(value);
    let mut result = FieldResult::new(resolved);

    for spec in &field.validators {
        let rule = registry.lookup(&spec.name).inspect_err(|_| {
            warn!(field = %field.name, rule = %spec.name, "rule is not registered");
        })?;

        let passed = rule.check(result.value.as_ref(), spec.arg.as_ref())?;
        trace!(field = %field.name, rule = %spec.name, passed, "rule evaluated");
        result.record(&spec.name, passed);

        if !continue_on_fail {
            break;
        }
    }

    debug!(
        field = %field.name,
        valid = result.valid,
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        "field validated"
    );
    Ok(result)
}
