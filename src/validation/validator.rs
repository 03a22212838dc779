//! The validator seam used by the form model.
//!
//! The model never calls the rule functions directly; it goes through
//! [`CardValidator`] so hosts (and tests) can substitute their own rules.

use chrono::{Local, NaiveDate};

use super::cvv::validate_cvv;
use super::expiration::{validate_expiration, validate_expiration_date, validate_month, validate_year};
use super::number::{validate_number, NumberOptions};
use super::postal::{validate_postal_code, PostalCodeOptions};
use super::Verification;
use crate::cards::CardCatalog;

/// Field-level validation rules.
///
/// Only [`number`](CardValidator::number) must be provided; every other rule
/// defaults to the standard implementation, evaluated against
/// [`today`](CardValidator::today).
pub trait CardValidator {
    /// The reference date for expiration rules and select defaults.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Adopt the catalog card types are detected with.
    ///
    /// The form calls this once at construction so number rules resolve
    /// brands against the same catalog. Validators that do not consult a
    /// catalog can ignore it.
    fn bind_catalog(&mut self, _catalog: &CardCatalog) {}

    /// Validate a card number.
    fn number(&self, value: &str, options: NumberOptions) -> Verification;

    /// Validate a security code against the accepted code sizes.
    fn cvv(&self, value: &str, sizes: &[usize]) -> Verification {
        validate_cvv(value, sizes)
    }

    /// Validate a combined expiration date.
    fn expiration_date(&self, value: &str) -> Verification {
        validate_expiration_date(value, self.today())
    }

    /// Validate an expiration month on its own.
    fn expiration_month(&self, value: &str) -> Verification {
        validate_month(value, self.today()).verification
    }

    /// Validate an expiration year on its own.
    fn expiration_year(&self, value: &str) -> Verification {
        validate_year(value, self.today()).verification
    }

    /// Validate discrete month and year values together.
    fn expiration_parts(&self, month: &str, year: &str) -> Verification {
        validate_expiration(month, year, self.today())
    }

    /// Validate a postal code.
    fn postal_code(&self, value: &str, options: PostalCodeOptions) -> Verification {
        validate_postal_code(value, options)
    }
}

/// The standard rules, backed by a brand catalog.
///
/// ## Example
///
/// ```
/// use card_fields::validation::{CardValidator, NumberOptions, StandardValidator, Verification};
///
/// let validator = StandardValidator::default();
/// assert_eq!(
///     validator.number("4111111111111111", NumberOptions::default()),
///     Verification::VALID
/// );
/// ```
#[derive(Clone, Debug)]
pub struct StandardValidator {
    catalog: CardCatalog,
    today: Option<NaiveDate>,
}

impl Default for StandardValidator {
    fn default() -> Self {
        Self::new(CardCatalog::standard())
    }
}

impl StandardValidator {
    /// Create a validator over a catalog.
    #[must_use]
    pub fn new(catalog: CardCatalog) -> Self {
        Self {
            catalog,
            today: None,
        }
    }

    /// Pin the reference date (builder pattern).
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The catalog numbers are resolved against.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }
}

impl CardValidator for StandardValidator {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn bind_catalog(&mut self, catalog: &CardCatalog) {
        self.catalog = catalog.clone();
    }

    fn number(&self, value: &str, options: NumberOptions) -> Verification {
        validate_number(&self.catalog, value, options)
    }
}
