#![forbid(unsafe_code)]

//! Validation events and their subscribers
//!
//! Events borrow their payload from the form that raises them; subscribers
//! run inline, in the order they subscribed, at the point of emission.

use crate::engine::{FieldResult, Report};
use std::fmt;
use std::str::FromStr;

/// Kinds of events raised while validating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A field finished with every evaluated rule passing
    FieldValid,
    /// A field finished with at least one failed rule
    FieldInvalid,
    /// A whole-form pass finished with every field valid
    Valid,
    /// A whole-form pass finished with at least one invalid field
    Invalid,
}

impl EventKind {
    /// Event name as subscribers refer to it
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FieldValid => "field valid",
            EventKind::FieldInvalid => "field invalid",
            EventKind::Valid => "valid",
            EventKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "field valid" => Ok(EventKind::FieldValid),
            "field invalid" => Ok(EventKind::FieldInvalid),
            "valid" => Ok(EventKind::Valid),
            "invalid" => Ok(EventKind::Invalid),
            other => Err(format!("Unknown event: {}", other)),
        }
    }
}

/// An event together with its payload
#[derive(Debug, Clone, Copy)]
pub enum FormEvent<'a> {
    FieldValid {
        name: &'a str,
        result: &'a FieldResult,
    },
    FieldInvalid {
        name: &'a str,
        result: &'a FieldResult,
    },
    Valid(&'a Report),
    Invalid(&'a Report),
}

impl<'a> FormEvent<'a> {
    /// Event for a finished field
    pub fn field(name: &'a str, result: &'a FieldResult) -> Self {
        if result.valid {
            FormEvent::FieldValid { name, result }
        } else {
            FormEvent::FieldInvalid { name, result }
        }
    }

    /// Event for a finished whole-form pass
    pub fn form(valid: bool, report: &'a Report) -> Self {
        if valid {
            FormEvent::Valid(report)
        } else {
            FormEvent::Invalid(report)
        }
    }

    /// Kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            FormEvent::FieldValid { .. } => EventKind::FieldValid,
            FormEvent::FieldInvalid { .. } => EventKind::FieldInvalid,
            FormEvent::Valid(_) => EventKind::Valid,
            FormEvent::Invalid(_) => EventKind::Invalid,
        }
    }
}

type Callback = Box<dyn FnMut(&FormEvent<'_>)>;

/// Subscribers registered on a form
#[derive(Default)]
pub(crate) struct Subscribers {
    entries: Vec<(Option<EventKind>, Callback)>,
}

impl Subscribers {
    /// Subscribe to one kind, or to every kind when `kind` is `None`
    pub(crate) fn add(&mut self, kind: Option<EventKind>, callback: Callback) {
        self.entries.push((kind, callback));
    }

    pub(crate) fn emit(&mut self, event: &FormEvent<'_>) {
        let kind = event.kind();
        for (filter, callback) in &mut self.entries {
            if filter.is_none_or(|wanted| wanted == kind) {
                callback(event);
            }
        }
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
