#![forbid(unsafe_code)]

//! Coercions applied to dynamic field values
//!
//! Rules see values as `Option<&Value>`: `None` means the field had no value
//! at all, while JSON `null` is a present value. Length-based rules measure
//! the canonical textual form; numeric rules compare the coerced number.

use serde_json::{Number, Value};

/// Canonical textual form of a value
///
/// Returns `None` for absent values and for `null`, which have no textual form.
pub fn to_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(format_number(n)),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| to_text(Some(item)).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some("[object Object]".to_string()),
    }
}

/// Number of characters in the textual form, if there is one
pub fn text_len(value: Option<&Value>) -> Option<usize> {
    to_text(value).map(|text| text.chars().count())
}

/// Coerce a value to a number, yielding NaN when it has no numeric reading
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_number(s),
        Some(array @ Value::Array(_)) => to_text(Some(array))
            .map(|text| parse_number(&text))
            .unwrap_or(f64::NAN),
        Some(Value::Object(_)) => f64::NAN,
    }
}

/// Whether the value coerces to a number other than NaN
pub fn is_numeric(value: Option<&Value>) -> bool {
    !to_number(value).is_nan()
}

/// Parse a numeric string the way form input is usually read
///
/// Surrounding whitespace is ignored and an empty string reads as zero.
/// Accepts decimal literals with optional sign and exponent, the words
/// `Infinity`/`+Infinity`/`-Infinity`, and unsigned `0x`/`0o`/`0b` integers.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust's float parser also accepts "inf" and "nan"; only plain decimal
    // literals are numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{:.0}", f)
        }
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_of_scalars() {
        assert_eq!(to_text(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(to_text(Some(&json!(15))), Some("15".to_string()));
        assert_eq!(to_text(Some(&json!(1.5))), Some("1.5".to_string()));
        assert_eq!(to_text(Some(&json!(15.0))), Some("15".to_string()));
        assert_eq!(to_text(Some(&json!(true))), Some("true".to_string()));
    }

    #[test]
    fn test_text_of_large_integral_floats() {
        assert_eq!(
            to_text(Some(&json!(1e20))),
            Some("100000000000000000000".to_string())
        );
        assert_eq!(
            to_text(Some(&json!(-1e20))),
            Some("-100000000000000000000".to_string())
        );
        assert_eq!(text_len(Some(&json!(1e20))), Some(21));
    }

    #[test]
    fn test_text_of_absent_and_null() {
        assert_eq!(to_text(None), None);
        assert_eq!(to_text(Some(&Value::Null)), None);
    }

    #[test]
    fn test_text_of_compound_values() {
        assert_eq!(to_text(Some(&json!([1, "a", null]))), Some("1,a,".to_string()));
        assert_eq!(
            to_text(Some(&json!({"a": 1}))),
            Some("[object Object]".to_string())
        );
    }

    #[test]
    fn test_text_len_counts_characters() {
        assert_eq!(text_len(Some(&json!("héllo"))), Some(5));
        assert_eq!(text_len(Some(&json!(12345))), Some(5));
        assert_eq!(text_len(None), None);
    }

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number(" 42 "), 42.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("-1.5e2"), -150.0);
        assert_eq!(parse_number("0x10"), 16.0);
        assert_eq!(parse_number("0b101"), 5.0);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_number_rejects_words() {
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("NaN").is_nan());
        assert!(parse_number("12px").is_nan());
        assert!(parse_number("-0x10").is_nan());
    }

    #[test]
    fn test_to_number_coercions() {
        assert!(to_number(None).is_nan());
        assert_eq!(to_number(Some(&Value::Null)), 0.0);
        assert_eq!(to_number(Some(&json!(true))), 1.0);
        assert_eq!(to_number(Some(&json!("18"))), 18.0);
        assert_eq!(to_number(Some(&json!([]))), 0.0);
        assert_eq!(to_number(Some(&json!([7]))), 7.0);
        assert!(to_number(Some(&json!([1, 2]))).is_nan());
        assert!(to_number(Some(&json!({}))).is_nan());
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric(Some(&json!(3))));
        assert!(is_numeric(Some(&json!("3.25"))));
        assert!(!is_numeric(Some(&json!("three"))));
        assert!(!is_numeric(None));
    }
}
