#![forbid(unsafe_code)]

//! Core Rule trait for named validation predicates

use crate::error::RuleError;
use serde_json::Value;

/// Trait that all rules must implement
///
/// A rule is a pure predicate over a resolved field value and the argument
/// declared alongside the rule name. `value` is `None` when the field has no
/// value at all; `arg` is `None` for rules declared without an argument.
///
/// The trait is `Send + Sync` so a registry can be shared across threads
/// once it is no longer being mutated.
pub trait Rule: Send + Sync {
    /// Evaluates the rule
    ///
    /// Returns `Ok(true)` when the value passes, `Ok(false)` when it fails,
    /// and `Err` when the rule cannot be evaluated at all (for example a
    /// malformed argument). Errors abort the validation call.
    fn check(&self, value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError>;
}

impl<F> Rule for F
where
    F: Fn(Option<&Value>, Option<&Value>) -> Result<bool, RuleError> + Send + Sync,
{
    fn check(&self, value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
        self(value, arg)
    }
}

/// Wraps a fallible closure as a rule
///
/// Passing the closure through this function lets its parameter and return
/// types be inferred from the `Fn` bound.
pub fn rule_fn<F>(f: F) -> F
where
    F: Fn(Option<&Value>, Option<&Value>) -> Result<bool, RuleError> + Send + Sync + 'static,
{
    f
}

/// Wraps an infallible boolean predicate as a rule
pub fn predicate<F>(f: F) -> impl Rule
where
    F: Fn(Option<&Value>, Option<&Value>) -> bool + Send + Sync + 'static,
{
    move |value: Option<&Value>, arg: Option<&Value>| -> Result<bool, RuleError> {
        Ok(f(value, arg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct MockRule {
        expected: Value,
    }

    impl Rule for MockRule {
        fn check(&self, value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
            Ok(value == Some(&self.expected))
        }
    }

    #[test]
    fn test_rule_trait_implementation() {
        let rule = MockRule {
            expected: json!("yes"),
        };

        assert!(rule.check(Some(&json!("yes")), None).unwrap());
        assert!(!rule.check(Some(&json!("no")), None).unwrap());
        assert!(!rule.check(None, None).unwrap());
    }

    #[test]
    fn test_closure_is_a_rule() {
        let even = predicate(|value, _arg| {
            value.and_then(Value::as_i64).is_some_and(|n| n % 2 == 0)
        });

        assert!(even.check(Some(&json!(4)), None).unwrap());
        assert!(!even.check(Some(&json!(3)), None).unwrap());
    }

    #[test]
    fn test_predicate_receives_argument() {
        let at_least = predicate(|value, arg| {
            value.and_then(Value::as_f64) >= arg.and_then(Value::as_f64)
        });

        assert!(at_least.check(Some(&json!(5)), Some(&json!(3))).unwrap());
        assert!(!at_least.check(Some(&json!(2)), Some(&json!(3))).unwrap());
    }

    #[test]
    fn test_closure_errors_propagate() {
        let broken = rule_fn(|_value, _arg| {
            Err(RuleError::InvalidArgument {
                rule: "broken".to_string(),
                message: "always fails".to_string(),
            })
        });

        assert!(broken.check(None, None).is_err());
    }

    #[test]
    fn test_rule_is_send_sync() {
        fn assert_send<T: Send + ?Sized>() {}
        fn assert_sync<T: Sync + ?Sized>() {}

        assert_send::<Box<dyn Rule>>();
        assert_sync::<Box<dyn Rule>>();
    }
}
