//! Card number validation.

use super::Verification;
use crate::cards::CardCatalog;

/// Options for [`validate_number`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NumberOptions {
    /// Apply the Luhn check to UnionPay numbers too. Some UnionPay cards do
    /// not carry a Luhn check digit, so it is skipped unless requested.
    pub luhn_validate_union_pay: bool,
}

/// Luhn (mod 10) checksum over an all-digit string.
///
/// Returns `false` for empty input or any non-digit character.
#[must_use]
pub fn luhn(number: &str) -> bool {
    if number.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (i, c) in number.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }
    sum % 10 == 0
}

/// Remove the separators users commonly type inside a card number.
#[must_use]
pub fn strip_number_separators(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect()
}

/// Validate a (possibly partial) card number against a brand catalog.
///
/// - non-digit input, or input matching no brand: neither valid nor
///   potentially valid
/// - input matching several brands: potentially valid only
/// - input matching one brand: valid when its length is an accepted length
///   and the Luhn check passes; potentially valid while it is shorter than
///   the longest accepted length, or when it is complete and passes Luhn
pub fn validate_number(catalog: &CardCatalog, value: &str, options: NumberOptions) -> Verification {
    let digits = strip_number_separators(value);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Verification::INVALID;
    }

    let candidates = catalog.lookup(&digits);
    let card = match candidates.as_slice() {
        [] => return Verification::INVALID,
        [card] => card,
        _ => return Verification::PENDING,
    };

    let luhn_valid = if card.kind == "unionpay" && !options.luhn_validate_union_pay {
        true
    } else {
        luhn(&digits)
    };
    let max_length = card.max_length().unwrap_or(0);
    let length = digits.len();

    if card.lengths.contains(&length) {
        Verification::new(luhn_valid, length < max_length || luhn_valid)
    } else {
        Verification::new(false, length < max_length)
    }
}
