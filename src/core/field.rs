//! Field keys, attributes and per-field state.
//!
//! The set of fields is fixed: a form is configured with a subset of
//! [`FieldKey::ALL`]. Each configured field owns a [`FieldState`] whose five
//! attributes are addressed by [`FieldAttribute`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A modelled payment input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    /// Card number (PAN).
    Number,
    /// Card security code.
    Cvv,
    /// Combined expiration date (`MM/YY`, `MMYYYY`, ...).
    ExpirationDate,
    /// Discrete expiration month.
    ExpirationMonth,
    /// Discrete expiration year.
    ExpirationYear,
    /// Billing postal code.
    PostalCode,
}

impl FieldKey {
    /// Every known field key, in canonical order.
    pub const ALL: [FieldKey; 6] = [
        FieldKey::Number,
        FieldKey::Cvv,
        FieldKey::ExpirationDate,
        FieldKey::ExpirationMonth,
        FieldKey::ExpirationYear,
        FieldKey::PostalCode,
    ];

    /// The wire name of this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::Number => "number",
            FieldKey::Cvv => "cvv",
            FieldKey::ExpirationDate => "expirationDate",
            FieldKey::ExpirationMonth => "expirationMonth",
            FieldKey::ExpirationYear => "expirationYear",
            FieldKey::PostalCode => "postalCode",
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = UnknownFieldKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownFieldKey(s.to_string()))
    }
}

/// Returned when a string names no known field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown field key `{0}`")]
pub struct UnknownFieldKey(pub String);

/// One of the five attributes every field carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldAttribute {
    /// Raw input.
    Value,
    /// Whether the input currently has focus.
    IsFocused,
    /// Derived: `value` is the empty string.
    IsEmpty,
    /// Derived: the value is complete and valid.
    IsValid,
    /// Derived: the value could still become valid.
    IsPotentiallyValid,
}

impl FieldAttribute {
    /// Attributes in change-notification order.
    pub const ALL: [FieldAttribute; 5] = [
        FieldAttribute::Value,
        FieldAttribute::IsFocused,
        FieldAttribute::IsEmpty,
        FieldAttribute::IsValid,
        FieldAttribute::IsPotentiallyValid,
    ];

    /// The wire name of this attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldAttribute::Value => "value",
            FieldAttribute::IsFocused => "isFocused",
            FieldAttribute::IsEmpty => "isEmpty",
            FieldAttribute::IsValid => "isValid",
            FieldAttribute::IsPotentiallyValid => "isPotentiallyValid",
        }
    }

    /// Is this attribute stored as a flag (everything except `value`)?
    #[must_use]
    pub const fn is_flag(self) -> bool {
        !matches!(self, FieldAttribute::Value)
    }

    /// Is this attribute computed from the value rather than written by the
    /// host?
    #[must_use]
    pub const fn is_derived(self) -> bool {
        matches!(
            self,
            FieldAttribute::IsEmpty | FieldAttribute::IsValid | FieldAttribute::IsPotentiallyValid
        )
    }
}

impl std::fmt::Display for FieldAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldAttribute {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldAttribute::ALL
            .into_iter()
            .find(|attr| attr.as_str() == s)
            .ok_or(())
    }
}

/// State of a single field.
///
/// A fresh state is empty, unfocused, invalid and potentially valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    pub value: String,
    pub is_focused: bool,
    pub is_empty: bool,
    pub is_valid: bool,
    pub is_potentially_valid: bool,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            value: String::new(),
            is_focused: false,
            is_empty: true,
            is_valid: false,
            is_potentially_valid: true,
        }
    }
}

impl FieldState {
    /// A state pre-filled with a value that is already known to be valid.
    #[must_use]
    pub fn prefilled(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            is_empty: value.is_empty(),
            is_valid: true,
            is_potentially_valid: true,
            is_focused: false,
            value,
        }
    }

    /// Read a flag attribute. Returns `None` for [`FieldAttribute::Value`].
    #[must_use]
    pub fn flag(&self, attribute: FieldAttribute) -> Option<bool> {
        match attribute {
            FieldAttribute::Value => None,
            FieldAttribute::IsFocused => Some(self.is_focused),
            FieldAttribute::IsEmpty => Some(self.is_empty),
            FieldAttribute::IsValid => Some(self.is_valid),
            FieldAttribute::IsPotentiallyValid => Some(self.is_potentially_valid),
        }
    }

    /// Write a flag attribute, returning whether it changed.
    ///
    /// Writing [`FieldAttribute::Value`] through this method is a no-op.
    pub fn set_flag(&mut self, attribute: FieldAttribute, flag: bool) -> bool {
        let slot = match attribute {
            FieldAttribute::Value => return false,
            FieldAttribute::IsFocused => &mut self.is_focused,
            FieldAttribute::IsEmpty => &mut self.is_empty,
            FieldAttribute::IsValid => &mut self.is_valid,
            FieldAttribute::IsPotentiallyValid => &mut self.is_potentially_valid,
        };
        let changed = *slot != flag;
        *slot = flag;
        changed
    }

    /// Write the raw value, returning whether it changed.
    pub fn set_value(&mut self, value: &str) -> bool {
        if self.value == value {
            return false;
        }
        self.value.clear();
        self.value.push_str(value);
        true
    }
}
