//! Postal code validation.

use super::Verification;

/// Options for [`validate_postal_code`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostalCodeOptions {
    /// Minimum accepted length. `None` (or `0`) means any non-empty value.
    pub min_length: Option<usize>,
}

/// Validate a postal code.
///
/// Postal code formats vary too much by country to check anything beyond
/// length. Too-short input is potentially valid.
#[must_use]
pub fn validate_postal_code(value: &str, options: PostalCodeOptions) -> Verification {
    let min_length = options.min_length.unwrap_or(1).max(1);
    if value.chars().count() < min_length {
        Verification::PENDING
    } else {
        Verification::VALID
    }
}
