//! Expiration date, month and year validation.
//!
//! All rules are relative to a reference date (`today`), so callers decide
//! where "now" comes from. Years are accepted up to [`MAX_ELAPSED_YEARS`]
//! ahead of the current one.

use chrono::{Datelike, NaiveDate};

use super::Verification;

/// How many years ahead an expiration year may lie.
pub const MAX_ELAPSED_YEARS: u32 = 19;

/// Month verification plus whether the month is still ahead in the current
/// year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthVerification {
    pub verification: Verification,
    pub valid_for_this_year: bool,
}

/// Year verification plus whether the year is the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearVerification {
    pub verification: Verification,
    pub is_current_year: bool,
}

fn all_digits(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Validate an expiration month (`"1"`..`"12"`, optionally zero padded).
#[must_use]
pub fn validate_month(value: &str, today: NaiveDate) -> MonthVerification {
    let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    if value.is_empty() || value == "0" {
        return MonthVerification {
            verification: Verification::PENDING,
            valid_for_this_year: false,
        };
    }

    let month = if all_digits(&value) && value.len() <= 2 {
        value.parse::<u32>().ok()
    } else {
        None
    };
    let valid = month.is_some_and(|m| (1..=12).contains(&m));

    MonthVerification {
        verification: Verification::new(valid, valid),
        valid_for_this_year: valid && month.is_some_and(|m| m >= today.month()),
    }
}

/// Validate an expiration year, either two or four digits.
#[must_use]
pub fn validate_year(value: &str, today: NaiveDate) -> YearVerification {
    let not_current = |verification| YearVerification {
        verification,
        is_current_year: false,
    };

    if value.is_empty() {
        return not_current(Verification::PENDING);
    }
    if !all_digits(value) {
        return not_current(Verification::INVALID);
    }

    let current = today.year().max(0) as u32;
    let century = (current / 100).to_string();

    match value.len() {
        1 => not_current(Verification::PENDING),
        3 => not_current(Verification::new(false, value[..2] == century)),
        2 | 4 => {
            let Ok(year) = value.parse::<u32>() else {
                return not_current(Verification::INVALID);
            };
            let reference = if value.len() == 2 { current % 100 } else { current };
            let valid = year >= reference && year <= reference + MAX_ELAPSED_YEARS;
            let potentially_valid = valid || (value.len() == 2 && value == century);
            YearVerification {
                verification: Verification::new(valid, potentially_valid),
                is_current_year: year == reference,
            }
        }
        _ => not_current(Verification::INVALID),
    }
}

/// Validate a month and year together.
///
/// When both parts are valid on their own, a month already past in the
/// current year makes the date invalid.
#[must_use]
pub fn validate_expiration(month: &str, year: &str, today: NaiveDate) -> Verification {
    let month = validate_month(month, today);
    let year = validate_year(year, today);

    if month.verification.is_valid {
        if year.is_current_year {
            let ok = month.valid_for_this_year;
            return Verification::new(ok, ok);
        }
        if year.verification.is_valid {
            return Verification::VALID;
        }
    }

    if month.verification.is_potentially_valid && year.verification.is_potentially_valid {
        Verification::PENDING
    } else {
        Verification::INVALID
    }
}

/// Number of leading digits that form the month in a separator-free
/// expiration string.
///
/// One digit when the string starts with 2-9 or has odd length (`MYY`,
/// `MYYYY`); two otherwise.
#[must_use]
pub fn month_digit_count(digits: &str) -> usize {
    let starts_high = digits
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .is_some_and(|d| d >= 2);

    if digits.len() < 2 || starts_high || digits.len() % 2 == 1 {
        1
    } else {
        2
    }
}

/// Split a separator-free expiration string into `(month, year)`.
#[must_use]
pub fn split_expiration_digits(digits: &str) -> (&str, &str) {
    if digits.is_empty() {
        return ("", "");
    }
    let at = month_digit_count(digits).min(digits.len());
    if !digits.is_char_boundary(at) {
        return (digits, "");
    }
    digits.split_at(at)
}

/// Parse a combined expiration date into `(month, year)`.
///
/// Accepted shapes: `MM/YY[YY]`, `MM YY[YY]`, `YYYY-MM`, or a bare digit run.
#[must_use]
pub fn parse_expiration_date(value: &str) -> (String, String) {
    let value = value.trim();

    if let Some((year, month)) = value.split_once('-') {
        if year.len() == 4 && all_digits(year) && (1..=2).contains(&month.len()) && all_digits(month) {
            return (month.to_string(), year.to_string());
        }
    }

    let parts: Vec<&str> = if value.contains('/') {
        value.split('/').map(str::trim).collect()
    } else if value.contains(char::is_whitespace) {
        value.split_whitespace().collect()
    } else {
        let (month, year) = split_expiration_digits(value);
        return (month.to_string(), year.to_string());
    };

    let month = parts.first().copied().unwrap_or_default().to_string();
    let year = parts.get(1..).map(|rest| rest.concat()).unwrap_or_default();
    (month, year)
}

/// Validate a combined expiration date.
#[must_use]
pub fn validate_expiration_date(value: &str, today: NaiveDate) -> Verification {
    let (month, year) = parse_expiration_date(value);
    validate_expiration(&month, &year, today)
}
