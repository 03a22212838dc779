//! Errors raised at the crate's API boundary.
//!
//! The derivation chain itself never fails; these only cover malformed
//! configuration and string paths that do not address the model.

use thiserror::Error;

/// Configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON document did not match the configuration schema.
    #[error("invalid form configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A `get`/`set` call did not address the model correctly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The path is not of the form `field`, `field.attribute` or
    /// `possibleCardTypes`.
    #[error("unknown model path `{0}`")]
    UnknownPath(String),

    /// The path names a field this crate does not model.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// Whole fields and derived flags can be read but not assigned.
    #[error("path `{0}` cannot be assigned")]
    NotAssignable(String),

    /// The value does not fit the addressed attribute.
    #[error("path `{path}` expects {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
}
