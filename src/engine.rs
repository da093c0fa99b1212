//! Validation engine, field declarations, results and events

pub mod events;
pub mod field;
pub mod form;
pub mod result;

pub use events::{EventKind, FormEvent};
pub use field::{FieldDecl, RuleSpec};
pub use form::{Form, Record};
pub use result::{FieldResult, Report};
