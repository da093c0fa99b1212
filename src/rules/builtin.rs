#![forbid(unsafe_code)]

//! Built-in rules available to every form
//!
//! Every registry created with [`RuleRegistry::with_defaults`] starts from a
//! fresh copy of this table.
//!
//! [`RuleRegistry::with_defaults`]: crate::rules::RuleRegistry::with_defaults

use crate::error::RuleError;
use crate::value::{is_numeric, text_len, to_number, to_text};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, PoisonError};

/// Patterns passed to `regex`, keyed by source text
static PATTERNS: LazyLock<Mutex<HashMap<String, Regex>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Signature shared by all built-in rules
pub type BuiltinRule = fn(Option<&Value>, Option<&Value>) -> Result<bool, RuleError>;

/// Built-in rules keyed by the name fields refer to them with
pub const BUILTIN_RULES: &[(&str, BuiltinRule)] = &[
    ("number", number),
    ("boolean", boolean),
    ("string", string),
    ("integer", integer),
    ("float", float),
    ("alphanumeric", alphanumeric),
    ("email", email),
    ("defined", defined),
    ("required", required),
    ("range", range),
    ("min", min),
    ("max", max),
    ("minlength", minlength),
    ("minLength", minlength),
    ("maxlength", maxlength),
    ("maxLength", maxlength),
    ("length", length),
    ("regex", regex),
];

/// Longest address accepted by `email`
pub const EMAIL_MAX_LENGTH: usize = 254;

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]*$").expect("alphanumeric pattern is valid"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r##"^(?:[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*"##,
        r##"|"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21\x23-\x5b\x5d-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])*")"##,
        r##"@(?:(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?"##,
        r##"|\[(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}"##,
        r##"(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?|[a-z0-9-]*[a-z0-9]:"##,
        r##"(?:[\x01-\x08\x0b\x0c\x0e-\x1f\x21-\x5a\x53-\x7f]|\\[\x01-\x09\x0b\x0c\x0e-\x7f])+)\])$"##,
    ))
    .expect("email pattern is valid")
});

/// Value coerces to a number
pub fn number(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(is_numeric(value))
}

/// Value is the string `"true"` or `"false"`
pub fn boolean(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(matches!(value, Some(Value::String(s)) if s == "true" || s == "false"))
}

/// Value is a string
pub fn string(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(matches!(value, Some(Value::String(_))))
}

/// Value coerces to a finite number
pub fn integer(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(to_number(value).is_finite())
}

/// Value coerces to an infinite number
///
/// Only `Infinity`/`-Infinity` pass. Kept this way for compatibility with
/// existing form definitions; use `number` to accept decimals.
pub fn float(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(to_number(value).is_infinite())
}

/// Value is a string of ASCII letters and digits (empty passes)
pub fn alphanumeric(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(matches!(value, Some(Value::String(s)) if ALPHANUMERIC.is_match(s)))
}

/// Value is a string holding an email address
pub fn email(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(match value {
        Some(Value::String(s)) => s.chars().count() <= EMAIL_MAX_LENGTH && EMAIL.is_match(s),
        _ => false,
    })
}

/// Value is present
pub fn defined(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(value.is_some())
}

/// Value is present and its trimmed textual form is non-empty
pub fn required(value: Option<&Value>, _arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(to_text(value).is_some_and(|text| !text.trim().is_empty()))
}

/// Value is numeric and within `[low, high]`, inclusive
pub fn range(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    let n = to_number(value);
    if n.is_nan() {
        return Ok(false);
    }

    let bounds = match arg {
        Some(Value::Array(bounds)) => bounds,
        _ => {
            return Err(RuleError::InvalidArgument {
                rule: "range".to_string(),
                message: "expected an array of [min, max]".to_string(),
            });
        }
    };

    let low = to_number(bounds.first());
    let high = to_number(bounds.get(1));
    Ok(n >= low && n <= high)
}

/// Value is numeric and at least the argument
pub fn min(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(to_number(value) >= to_number(arg))
}

/// Value is numeric and at most the argument
pub fn max(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(to_number(value) <= to_number(arg))
}

/// Textual form has at least `arg` characters
pub fn minlength(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(text_len(value).is_some_and(|len| len as f64 >= to_number(arg)))
}

/// Textual form has at most `arg` characters
pub fn maxlength(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    Ok(text_len(value).is_some_and(|len| len as f64 <= to_number(arg)))
}

/// Textual form has exactly `arg` characters
///
/// The argument must be a number; a numeric string never matches.
pub fn length(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    let expected = match arg {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    };
    Ok(match (text_len(value), expected) {
        (Some(len), Some(expected)) => len as f64 == expected,
        _ => false,
    })
}

/// Textual form matches the regex pattern given as argument
pub fn regex(value: Option<&Value>, arg: Option<&Value>) -> Result<bool, RuleError> {
    let text = match to_text(value) {
        Some(text) => text,
        None => return Ok(false),
    };

    let pattern = match arg {
        Some(Value::String(pattern)) => pattern,
        _ => {
            return Err(RuleError::InvalidArgument {
                rule: "regex".to_string(),
                message: "expected a pattern string".to_string(),
            });
        }
    };

    Ok(compiled(pattern)?.is_match(&text))
}

/// Compile a pattern once and reuse it for later evaluations
fn compiled(pattern: &str) -> Result<Regex, RuleError> {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(pattern) {
        return Ok(re.clone());
    }

    let re = Regex::new(pattern).map_err(|e| {
        RuleError::InvalidRegex(format!("Failed to compile pattern '{}': {}", pattern, e))
    })?;
    cache.insert(pattern.to_string(), re.clone());
    Ok(re)
}
