//! Parsing and validation for TOML form definitions
//!
//! ```toml
//! [form]
//! version = "1"
//! continue_on_fail = true
//!
//! [[fields]]
//! name = "age"
//! validators = ["required", { min = 18 }]
//! ```

use crate::engine::FieldDecl;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A form definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Form metadata
    pub form: FormMeta,

    /// Field declarations in validation order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl FormConfig {
    /// Load a form definition from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a form definition from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: FormConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether forms built from this definition evaluate every rule by default
    pub fn continue_on_fail(&self) -> bool {
        self.form.continue_on_fail
    }

    /// Validate the definition
    fn validate(&self) -> Result<(), ConfigError> {
        if self.form.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported form definition version '{}'. Expected '1'",
                self.form.version
            )));
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Field names must not be empty".to_string(),
                ));
            }
            if !names.insert(field.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Duplicate field '{}'",
                    field.name
                )));
            }

            let mut rules = HashSet::new();
            for rule in field.rule_names() {
                if !rules.insert(rule) {
                    return Err(ConfigError::Validation(format!(
                        "Rule '{}' declared more than once for field '{}'",
                        rule, field.name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Form metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMeta {
    /// Definition format version (must be "1")
    pub version: String,

    /// Evaluate every rule of a field instead of only the first
    #[serde(default)]
    pub continue_on_fail: bool,
}
