//! Extracting submittable card data from the form.

use serde::{Deserialize, Serialize};

use crate::core::FieldKey;
use crate::validation::split_expiration_digits;

/// Raw card data ready for tokenization.
///
/// A member is `None` when its backing field is not configured.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl CardData {
    /// Collect card data for the configured `keys`, reading values through
    /// `value_of`.
    ///
    /// A combined expiration date is split into month and year; discrete
    /// month and year fields pass through verbatim.
    pub fn collect<'a>(keys: &[FieldKey], value_of: impl Fn(FieldKey) -> &'a str) -> Self {
        let mut data = CardData::default();

        for &key in keys {
            let value = value_of(key);
            match key {
                FieldKey::Number => data.number = Some(value.to_string()),
                FieldKey::Cvv => data.cvv = Some(value.to_string()),
                FieldKey::ExpirationDate => {
                    let (month, year) = split_expiration_date(value);
                    data.expiration_month = Some(month);
                    data.expiration_year = Some(year);
                }
                FieldKey::ExpirationMonth => data.expiration_month = Some(value.to_string()),
                FieldKey::ExpirationYear => data.expiration_year = Some(value.to_string()),
                FieldKey::PostalCode => data.postal_code = Some(value.to_string()),
            }
        }

        data
    }
}

/// Split a combined expiration date into a two-digit month and a year.
///
/// Spaces, slashes and hyphens are removed first. A single-digit month is
/// zero padded.
#[must_use]
pub fn split_expiration_date(value: &str) -> (String, String) {
    let digits: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '/' && *c != '-')
        .collect();

    let (month, year) = split_expiration_digits(&digits);
    let month = if month.len() == 1 {
        format!("0{month}")
    } else {
        month.to_string()
    };
    (month, year.to_string())
}
