//! Core model types: field keys and state, configuration, paths, errors.
//!
//! These are the building blocks shared by the card resolver, the validators
//! and the reactive form model.

pub mod config;
pub mod error;
pub mod field;
pub mod path;

pub use config::{FieldOptions, FormConfig};
pub use error::{ConfigError, ModelError};
pub use field::{FieldAttribute, FieldKey, FieldState, UnknownFieldKey};
pub use path::{ModelPath, ModelValue};
