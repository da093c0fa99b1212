#![forbid(unsafe_code)]

//! Field declarations
//!
//! A field names an input, optionally pins a literal value, and lists the
//! rules its value must satisfy in the order they are evaluated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One rule applied to a field, with its optional argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleSpec", into = "RawRuleSpec")]
pub struct RuleSpec {
    /// Registry name of the rule
    pub name: String,

    /// Argument passed to the rule; `None` for argument-less rules
    pub arg: Option<Value>,
}

impl RuleSpec {
    /// A rule without an argument
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
        }
    }

    /// A rule with an argument
    pub fn with_arg(name: impl Into<String>, arg: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            arg: Some(arg.into()),
        }
    }
}

/// Serialized form of a rule: a bare name or a single-entry `{ name = arg }` table
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawRuleSpec {
    Bare(String),
    WithArg(Map<String, Value>),
}

impl TryFrom<RawRuleSpec> for RuleSpec {
    type Error = String;

    fn try_from(raw: RawRuleSpec) -> Result<Self, Self::Error> {
        match raw {
            RawRuleSpec::Bare(name) => Ok(RuleSpec::new(name)),
            RawRuleSpec::WithArg(table) => {
                if table.len() != 1 {
                    return Err(format!(
                        "rule table must hold exactly one rule, found {}",
                        table.len()
                    ));
                }
                let (name, arg) = table
                    .into_iter()
                    .next()
                    .ok_or_else(|| "rule table is empty".to_string())?;
                Ok(RuleSpec {
                    name,
                    arg: Some(arg),
                })
            }
        }
    }
}

impl From<RuleSpec> for RawRuleSpec {
    fn from(spec: RuleSpec) -> Self {
        match spec.arg {
            None => RawRuleSpec::Bare(spec.name),
            Some(arg) => {
                let mut table = Map::new();
                table.insert(spec.name, arg);
                RawRuleSpec::WithArg(table)
            }
        }
    }
}

/// Declaration of a single form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name, unique within a form
    pub name: String,

    /// Literal value that takes precedence over the input record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Rules in evaluation order
    #[serde(default)]
    pub validators: Vec<RuleSpec>,
}

impl FieldDecl {
    /// Declare a field with no literal value and no rules
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            validators: Vec::new(),
        }
    }

    /// Pin a literal value for the field
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Append an argument-less rule
    pub fn rule(self, name: impl Into<String>) -> Self {
        self.push(RuleSpec::new(name))
    }

    /// Append a rule with an argument
    pub fn rule_with(self, name: impl Into<String>, arg: impl Into<Value>) -> Self {
        self.push(RuleSpec::with_arg(name, arg))
    }

    /// Rule names keep their first position; declaring one again only
    /// replaces its argument.
    fn push(mut self, spec: RuleSpec) -> Self {
        match self.validators.iter_mut().find(|v| v.name == spec.name) {
            Some(existing) => existing.arg = spec.arg,
            None => self.validators.push(spec),
        }
        self
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(|spec| spec.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_keeps_declaration_order() {
        let field = FieldDecl::new("age").rule("required").rule_with("min", 18);

        assert_eq!(field.rule_names().collect::<Vec<_>>(), vec!["required", "min"]);
        assert_eq!(field.validators[1].arg, Some(json!(18)));
        assert!(field.value.is_none());
    }

    #[test]
    fn test_redeclared_rule_replaces_argument_in_place() {
        let field = FieldDecl::new("age")
            .rule_with("min", 18)
            .rule("required")
            .rule_with("min", 21);

        assert_eq!(field.rule_names().collect::<Vec<_>>(), vec!["min", "required"]);
        assert_eq!(field.validators[0].arg, Some(json!(21)));
    }

    #[test]
    fn test_literal_value() {
        let field = FieldDecl::new("kind").value("person");
        assert_eq!(field.value, Some(json!("person")));
    }

    #[test]
    fn test_rule_spec_deserialize_bare_and_table() {
        let specs: Vec<RuleSpec> =
            serde_json::from_value(json!(["required", {"range": [1, 5]}])).unwrap();

        assert_eq!(specs[0], RuleSpec::new("required"));
        assert_eq!(specs[1], RuleSpec::with_arg("range", json!([1, 5])));
    }

    #[test]
    fn test_rule_spec_rejects_multi_entry_table() {
        let result: Result<RuleSpec, _> = serde_json::from_value(json!({"min": 1, "max": 2}));
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_spec_serializes_like_it_parses() {
        let spec = RuleSpec::with_arg("min", 3);
        assert_eq!(serde_json::to_value(&spec).unwrap(), json!({"min": 3}));
        assert_eq!(
            serde_json::to_value(RuleSpec::new("email")).unwrap(),
            json!("email")
        );
    }
}
