//! Test utilities for fieldcheck integration tests

#![allow(dead_code)]

use fieldcheck::{FormEvent, Record};
use serde_json::Value;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Build an input record from a `json!` object
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// Path to a form definition under tests/fixtures/forms
pub fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("forms")
        .join(filename)
}

/// Shared log of events rendered as `"<kind>"` or `"<kind>:<field>"`
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// Callback that appends every event it sees to `log`
pub fn recorder(log: &EventLog) -> impl FnMut(&FormEvent<'_>) + 'static {
    let log = Rc::clone(log);
    move |event| {
        let entry = match event {
            FormEvent::FieldValid { name, .. } | FormEvent::FieldInvalid { name, .. } => {
                format!("{}:{}", event.kind(), name)
            }
            FormEvent::Valid(_) | FormEvent::Invalid(_) => event.kind().to_string(),
        };
        log.borrow_mut().push(entry);
    }
}
