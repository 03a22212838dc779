//! Form configuration.
//!
//! Hosts describe the form once, at startup:
//! - which fields exist and in what order (`fields`)
//! - per-field options (`select`, `placeholder`, `minlength`)
//! - an optional allow-list of card brands (`supportedCardTypes`)
//!
//! Field names are kept as strings so that a configuration naming fields this
//! crate does not model still parses; unknown names are dropped when the form
//! is built.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ConfigError;
use super::field::FieldKey;

/// Options for a single field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    /// Rendered as a `<select>` rather than a text input.
    ///
    /// Any non-null, non-`false` JSON value enables it.
    #[serde(default, deserialize_with = "deserialize_select")]
    pub select: bool,

    /// Placeholder text. For `select` month/year fields this adds an empty
    /// option, so the field starts out empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Minimum accepted length (postal code, CVV-only integrations).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minlength: Option<usize>,
}

impl FieldOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render as a select (builder pattern).
    #[must_use]
    pub fn select(mut self) -> Self {
        self.select = true;
        self
    }

    /// Set a placeholder (builder pattern).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set a minimum length (builder pattern).
    #[must_use]
    pub fn with_minlength(mut self, minlength: usize) -> Self {
        self.minlength = Some(minlength);
        self
    }
}

fn deserialize_select<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(!matches!(value, serde_json::Value::Null | serde_json::Value::Bool(false)))
}

/// Complete form configuration.
///
/// ## Example
///
/// ```
/// use card_fields::core::{FieldKey, FieldOptions, FormConfig};
///
/// let config = FormConfig::new()
///     .with_field(FieldKey::Number, FieldOptions::new())
///     .with_field(FieldKey::Cvv, FieldOptions::new())
///     .with_supported_card_types(["visa", "Master-Card"]);
///
/// assert_eq!(config.field_keys(), vec![FieldKey::Number, FieldKey::Cvv]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Fields in declared order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldOptions>,

    /// Brands the merchant accepts. `None` accepts everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_card_types: Option<Vec<String>>,
}

impl FormConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a field (builder pattern).
    #[must_use]
    pub fn with_field(mut self, key: FieldKey, options: FieldOptions) -> Self {
        self.fields.insert(key.as_str().to_string(), options);
        self
    }

    /// Add a field by raw name (builder pattern). Unknown names are kept
    /// here and dropped when a form is built from the configuration.
    #[must_use]
    pub fn with_raw_field(mut self, name: impl Into<String>, options: FieldOptions) -> Self {
        self.fields.insert(name.into(), options);
        self
    }

    /// Set the supported brand allow-list (builder pattern).
    #[must_use]
    pub fn with_supported_card_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_card_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Known field keys, in declared order.
    #[must_use]
    pub fn field_keys(&self) -> Vec<FieldKey> {
        self.fields
            .keys()
            .filter_map(|name| name.parse::<FieldKey>().ok())
            .collect()
    }

    /// Options for a field, if configured.
    #[must_use]
    pub fn field(&self, key: FieldKey) -> Option<&FieldOptions> {
        self.fields.get(key.as_str())
    }

    /// Is the field configured?
    #[must_use]
    pub fn has_field(&self, key: FieldKey) -> bool {
        self.fields.contains_key(key.as_str())
    }
}
