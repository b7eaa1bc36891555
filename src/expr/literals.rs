//! Decimal literals.

use malachite::num::arithmetic::traits::Pow;
use malachite::num::basic::traits::Zero;
use malachite::num::conversion::traits::{ExactFrom, FromStringBase};
use malachite::{Natural, Rational};

/// Constructs `numerator / denominator` from their decimal digits. The sign
/// indicates whether the result, if non-zero, is positive.
pub fn ratio(
    sign: bool,
    numerator: &str,
    denominator: &str,
) -> Option<Rational> {
    let numerator = Natural::from_string_base(10, numerator)?;
    let denominator = Natural::from_string_base(10, denominator)?;

    if denominator == 0 {
        return None;
    }

    Some(Rational::from_sign_and_naturals(sign, numerator, denominator))
}

/// Constructs `integer.fraction` from its decimal digits.
pub fn fixed_point(
    sign: bool,
    integer: &str,
    fraction: &str,
) -> Option<Rational> {
    let fraction = fraction.trim_end_matches('0');
    let w = fraction.len();

    let integer = Natural::from_string_base(10, integer)?;

    let fraction = if w != 0 {
        Natural::from_string_base(10, fraction)?
    } else {
        Natural::ZERO
    };

    let denominator = Natural::from(10u32).pow(u64::exact_from(w));
    let numerator = integer * &denominator + fraction;

    Some(Rational::from_sign_and_naturals(sign, numerator, denominator))
}

/// Constructs `integer.fraction * 10^exponent`. The exponent may be signed.
pub fn scientific(
    sign: bool,
    integer: &str,
    fraction: &str,
    exponent: &str,
) -> Option<Rational> {
    let mantissa = fixed_point(sign, integer, fraction)?;
    let exponent: i64 = exponent.parse().ok()?;

    Some(mantissa * Rational::from(10).pow(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios() {
        assert_eq!(ratio(false, "6", "4"), Some(Rational::from_signeds(-3, 2)));
        assert_eq!(ratio(true, "0", "7"), Some(Rational::ZERO));
        assert_eq!(ratio(true, "1", "0"), None);
    }

    #[test]
    fn fixed_point_parsing() {
        assert_eq!(
            fixed_point(true, "1", "42"),
            Some(Rational::from_signeds(71, 50))
        );
        assert_eq!(
            fixed_point(false, "0", "125"),
            Some(Rational::from_signeds(-1, 8))
        );
        assert_eq!(fixed_point(true, "12", "000"), Some(Rational::from(12)));
    }

    #[test]
    fn scientific_parsing() {
        assert_eq!(scientific(true, "1", "5", "3"), Some(Rational::from(1500)));
        assert_eq!(
            scientific(true, "2", "5", "-2"),
            Some(Rational::from_signeds(1, 40))
        );
        assert_eq!(scientific(true, "1", "0", "+1"), Some(Rational::from(10)));
    }
}
