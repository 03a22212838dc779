//! Field validation rules.
//!
//! Every rule returns a [`Verification`]: whether the value is valid now, and
//! whether it could still become valid with more input.
//!
//! ## Key Types
//!
//! - [`Verification`]: Result of a rule
//! - [`CardValidator`]: Seam the form model validates through
//! - [`StandardValidator`]: Catalog-backed default rules

pub mod cvv;
pub mod expiration;
pub mod number;
pub mod postal;
pub mod validator;

use serde::{Deserialize, Serialize};

pub use cvv::validate_cvv;
pub use expiration::{
    parse_expiration_date, split_expiration_digits, validate_expiration,
    validate_expiration_date, validate_month, validate_year,
};
pub use number::{luhn, strip_number_separators, validate_number, NumberOptions};
pub use postal::{validate_postal_code, PostalCodeOptions};
pub use validator::{CardValidator, StandardValidator};

/// Outcome of a validation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub is_valid: bool,
    pub is_potentially_valid: bool,
}

impl Verification {
    /// Complete and valid.
    pub const VALID: Self = Self::new(true, true);
    /// Not valid yet, but more input may fix it.
    pub const PENDING: Self = Self::new(false, true);
    /// Cannot become valid.
    pub const INVALID: Self = Self::new(false, false);

    /// Create a verification.
    #[must_use]
    pub const fn new(is_valid: bool, is_potentially_valid: bool) -> Self {
        Self {
            is_valid,
            is_potentially_valid,
        }
    }
}
