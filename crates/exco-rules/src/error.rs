//! Rule catalog error types.
//!
//! Every variant is a configuration error: a catalog that fails to load or
//! validate must stop startup rather than evaluate shipments against a
//! partial rule set. Errors carry the file path or the offending rule so the
//! catalog author can find it.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a rule catalog.
#[derive(Debug, Error)]
pub enum RulesError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required file was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A rule failed load-time validation.
    #[error("invalid {section} rule {rule:?}: {detail}")]
    InvalidRule {
        section: &'static str,
        rule: String,
        detail: String,
    },

    /// Weight bounds or an identifier failed core validation.
    #[error("validation error: {0}")]
    Validation(#[from] exco_core::ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rule catalog operations.
pub type RulesResult<T> = Result<T, RulesError>;
