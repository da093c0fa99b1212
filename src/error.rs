//! Error types for fieldcheck
//!
//! Errors are split by where they originate: rule evaluation, form
//! configuration, and the top-level validation engine which wraps both.

/// Rule-related errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Rule name referenced by a field but absent from the registry
    #[error("Validator \"{0}\" is not defined")]
    NotFound(String),

    /// Rule argument missing or of the wrong shape
    #[error("Invalid argument for rule '{rule}': {message}")]
    InvalidArgument { rule: String, message: String },

    /// Regex pattern supplied as a rule argument failed to compile
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Form definition could not be read
    #[error("Failed to read form definition: {0}")]
    Io(#[from] std::io::Error),

    /// Form definition is not valid TOML or does not match the schema
    #[error("Invalid form definition syntax: {0}")]
    Toml(#[from] toml::de::Error),

    /// Form definition parsed but is semantically invalid
    #[error("Invalid form definition: {0}")]
    Validation(String),
}

/// Top-level error type for fieldcheck
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// `validate_field` called with a name no field declares
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
