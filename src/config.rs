//! Form definition parsing and validation

pub mod form_toml;

pub use form_toml::{FormConfig, FormMeta};
