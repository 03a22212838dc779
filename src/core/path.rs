//! Addressing model data by path.
//!
//! The surrounding transport layer speaks in dotted paths (`"cvv.value"`,
//! `"number.isFocused"`, `"possibleCardTypes"`). [`ModelPath`] is the parsed
//! form and [`ModelValue`] the payload read from or written to it.

use std::str::FromStr;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::field::{FieldAttribute, FieldKey, FieldState};
use crate::cards::CardType;

/// A parsed model path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelPath {
    /// A whole field (`"number"`). Read-only.
    Field(FieldKey),
    /// One attribute of a field (`"number.value"`).
    Attribute(FieldKey, FieldAttribute),
    /// The derived candidate brand list.
    PossibleCardTypes,
}

impl ModelPath {
    /// Name of the possible-card-types path.
    pub const POSSIBLE_CARD_TYPES: &'static str = "possibleCardTypes";
}

impl FromStr for ModelPath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Self::POSSIBLE_CARD_TYPES {
            return Ok(ModelPath::PossibleCardTypes);
        }

        let (field, attribute) = match s.split_once('.') {
            Some((field, attribute)) => (field, Some(attribute)),
            None => (s, None),
        };

        let key = field
            .parse::<FieldKey>()
            .map_err(|_| ModelError::UnknownField(field.to_string()))?;

        match attribute {
            None => Ok(ModelPath::Field(key)),
            Some(attribute) => attribute
                .parse::<FieldAttribute>()
                .map(|attribute| ModelPath::Attribute(key, attribute))
                .map_err(|()| ModelError::UnknownPath(s.to_string())),
        }
    }
}

impl std::fmt::Display for ModelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelPath::Field(key) => write!(f, "{key}"),
            ModelPath::Attribute(key, attribute) => write!(f, "{key}.{attribute}"),
            ModelPath::PossibleCardTypes => f.write_str(Self::POSSIBLE_CARD_TYPES),
        }
    }
}

/// A value stored in the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelValue {
    /// A raw field value.
    Text(String),
    /// A field flag.
    Flag(bool),
    /// A whole field.
    Field(FieldState),
    /// The candidate brand list.
    CardTypes(Vector<CardType>),
}

impl ModelValue {
    /// Get as text if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool if this is a Flag value.
    #[must_use]
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ModelValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the field state if this is a Field value.
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldState> {
        match self {
            ModelValue::Field(state) => Some(state),
            _ => None,
        }
    }

    /// Get the brand list if this is a CardTypes value.
    #[must_use]
    pub fn as_card_types(&self) -> Option<&Vector<CardType>> {
        match self {
            ModelValue::CardTypes(types) => Some(types),
            _ => None,
        }
    }
}

impl From<&str> for ModelValue {
    fn from(v: &str) -> Self {
        ModelValue::Text(v.to_string())
    }
}

impl From<String> for ModelValue {
    fn from(v: String) -> Self {
        ModelValue::Text(v)
    }
}

impl From<bool> for ModelValue {
    fn from(v: bool) -> Self {
        ModelValue::Flag(v)
    }
}

impl From<FieldState> for ModelValue {
    fn from(v: FieldState) -> Self {
        ModelValue::Field(v)
    }
}

impl From<Vec<CardType>> for ModelValue {
    fn from(v: Vec<CardType>) -> Self {
        ModelValue::CardTypes(v.into_iter().collect())
    }
}

impl From<Vector<CardType>> for ModelValue {
    fn from(v: Vector<CardType>) -> Self {
        ModelValue::CardTypes(v)
    }
}
