//! Merchant allow-list of card brands.

use serde::{Deserialize, Serialize};

/// Normalize a brand name: lower-case, separators removed.
///
/// ```
/// use card_fields::cards::normalize_card_type;
///
/// assert_eq!(normalize_card_type("Master-Card"), "mastercard");
/// assert_eq!(normalize_card_type("american-express"), "americanexpress");
/// ```
#[must_use]
pub fn normalize_card_type(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Normalized, de-duplicated list of accepted brands.
///
/// Names matching no catalog brand are kept; they simply never match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedCardTypes(Vec<String>);

impl SupportedCardTypes {
    /// Build from raw merchant-supplied names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for name in names {
            let name = normalize_card_type(name.as_ref());
            if !normalized.contains(&name) {
                normalized.push(name);
            }
        }
        Self(normalized)
    }

    /// Does the list accept this brand key?
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        let kind = normalize_card_type(kind);
        self.0.iter().any(|name| *name == kind)
    }

    /// Normalized names in the order given.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
