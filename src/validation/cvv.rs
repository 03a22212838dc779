//! Security code validation.

use super::Verification;

/// Validate a security code against the accepted code sizes.
///
/// Valid when the length is one of `sizes`; potentially valid while it does
/// not exceed the largest size. With no sizes at all a digit string can never
/// become valid but is never rejected either.
#[must_use]
pub fn validate_cvv(value: &str, sizes: &[usize]) -> Verification {
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Verification::INVALID;
    }

    let length = value.len();
    if sizes.contains(&length) {
        return Verification::VALID;
    }

    match sizes.iter().max() {
        Some(&max) if length > max => Verification::INVALID,
        _ => Verification::PENDING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_size() {
        assert_eq!(validate_cvv("", &[3]), Verification::PENDING);
        assert_eq!(validate_cvv("12", &[3]), Verification::PENDING);
        assert_eq!(validate_cvv("123", &[3]), Verification::VALID);
        assert_eq!(validate_cvv("1234", &[3]), Verification::INVALID);
    }

    #[test]
    fn test_multiple_sizes() {
        assert_eq!(validate_cvv("123", &[3, 4]), Verification::VALID);
        assert_eq!(validate_cvv("1234", &[3, 4]), Verification::VALID);
        assert_eq!(validate_cvv("12345", &[3, 4]), Verification::INVALID);
    }

    #[test]
    fn test_gap_between_sizes_is_pending() {
        assert_eq!(validate_cvv("1234", &[3, 5]), Verification::PENDING);
    }

    #[test]
    fn test_non_digits() {
        assert_eq!(validate_cvv("not-a-cvv", &[3, 4]), Verification::INVALID);
        assert_eq!(validate_cvv("12a", &[3]), Verification::INVALID);
    }

    #[test]
    fn test_no_sizes() {
        assert_eq!(validate_cvv("123", &[]), Verification::PENDING);
        assert_eq!(validate_cvv("123456789", &[]), Verification::PENDING);
    }
}
