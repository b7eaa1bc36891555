//! Arbitrary-precision arithmetic settings.
//!
//! Every scalar handled by the sampler, the LP builder and the simplex solver
//! is a [`Rational`] carrying at most [`Precision::bits`] significant bits.
//! Intermediate results are computed exactly and rounded to nearest, so a
//! `Precision` plays the role of a floating-point context without any global
//! state: two optimizers may run side by side at different precisions.

use std::cmp::{self, Ordering};

use malachite::num::arithmetic::traits::{Abs, Pow, PowerOf2, Sign};
use malachite::num::basic::traits::Zero;
use malachite::num::conversion::traits::{FromSciString, RoundingFrom};
use malachite::rounding_modes::RoundingMode;
use malachite::{Integer, Rational};

use crate::error::ApproxError;
use crate::utils::rational::round_significant;

/// A working precision, given in significant decimal digits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Precision {
    digits: u32,
    bits: u32,
    tolerance: Rational,
}

impl Precision {
    /// Creates a context carrying `digits` significant decimal digits.
    pub fn new(digits: u32) -> Result<Precision, ApproxError> {
        if digits == 0 {
            return Err(ApproxError::InvalidConfiguration(String::from(
                "precision must be a positive number of digits",
            )));
        }

        let bits = digits_to_bits(digits).ok_or_else(|| {
            ApproxError::InvalidConfiguration(format!(
                "precision of {digits} digits is too large"
            ))
        })?;

        let tolerance = power_of_ten(-i64::from(cmp::max(digits / 2, 1)));

        Ok(Precision {
            digits,
            bits,
            tolerance,
        })
    }

    /// Number of significant decimal digits.
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Number of significant binary digits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Magnitude below which a value is indistinguishable from zero.
    pub fn tolerance(&self) -> &Rational {
        &self.tolerance
    }

    /// Relative spacing of representable values, `2^(1 - bits)`.
    pub fn epsilon(&self) -> Rational {
        Rational::power_of_2(1 - i64::from(self.bits))
    }

    /// A context with `extra` additional bits, for internal computations whose
    /// error must stay below the rounding error of the final result.
    pub fn with_guard_bits(&self, extra: u32) -> Precision {
        Precision {
            bits: self.bits.saturating_add(extra),
            ..self.clone()
        }
    }

    pub fn round(&self, x: Rational) -> Rational {
        round_significant(x, self.bits, RoundingMode::Nearest)
    }

    pub fn is_negligible(&self, x: &Rational) -> bool {
        x.abs() <= self.tolerance
    }

    pub fn add(&self, a: &Rational, b: &Rational) -> Rational {
        self.round(a + b)
    }

    pub fn sub(&self, a: &Rational, b: &Rational) -> Rational {
        self.round(a - b)
    }

    pub fn mul(&self, a: &Rational, b: &Rational) -> Rational {
        self.round(a * b)
    }

    /// Divides `a` by `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is zero.
    pub fn div(&self, a: &Rational, b: &Rational) -> Rational {
        self.round(a / b)
    }

    /// Computes the inner product of two sequences, rounding once.
    pub fn dot<'a, I, J>(&self, a: I, b: J) -> Rational
    where
        I: IntoIterator<Item = &'a Rational>,
        J: IntoIterator<Item = &'a Rational>,
    {
        let sum = a
            .into_iter()
            .zip(b)
            .fold(Rational::ZERO, |acc, (x, y)| acc + x * y);

        self.round(sum)
    }

    /// Parses a decimal literal such as `-1.5` or `2.5e-3`.
    pub fn parse(&self, s: &str) -> Option<Rational> {
        Rational::from_sci_string(s).map(|x| self.round(x))
    }

    /// Converts a finite float exactly, then rounds it to this precision.
    pub fn from_f64(&self, x: f64) -> Option<Rational> {
        Rational::try_from(x).ok().map(|x| self.round(x))
    }

    /// Renders `x` with at most [`Precision::digits`] significant digits.
    pub fn to_decimal(&self, x: &Rational) -> String {
        if x.sign() == Ordering::Equal {
            return String::from("0.0");
        }

        let magnitude = x.abs();
        let digits = i64::from(self.digits);

        let (mut exponent, mut mantissa) = scaled_mantissa(&magnitude, digits);

        if mantissa.len() > self.digits as usize {
            exponent += 1;
            mantissa = rounded_digits(&magnitude, digits - 1 - exponent);
        }

        let significant = mantissa.trim_end_matches('0');
        let significant = if significant.is_empty() {
            "0"
        } else {
            significant
        };

        let sign = if x.sign() == Ordering::Less { "-" } else { "" };

        if (-5..digits).contains(&exponent) {
            format!("{sign}{}", positional(significant, exponent))
        } else {
            let (lead, rest) = significant.split_at(1);
            let rest = if rest.is_empty() { "0" } else { rest };

            format!("{sign}{lead}.{rest}e{exponent}")
        }
    }
}

/// Converts decimal digits to binary digits, rounding `(digits + 1) log2(10)`
/// to the nearest integer.
fn digits_to_bits(digits: u32) -> Option<u32> {
    const LOG2_10: u64 = 33_219_280_949;
    const SCALE: u64 = 10_000_000_000;

    let bits = (u64::from(digits) + 1)
        .checked_mul(LOG2_10)?
        .checked_add(SCALE / 2)?;

    u32::try_from(bits / SCALE).ok()
}

fn power_of_ten(exponent: i64) -> Rational {
    Rational::from(10).pow(exponent)
}

/// Finds the decimal exponent of `magnitude` and its leading digits.
fn scaled_mantissa(magnitude: &Rational, digits: i64) -> (i64, String) {
    let estimate = magnitude.floor_log_base_2_abs() as f64
        * std::f64::consts::LOG10_2;

    let mut exponent = estimate.floor() as i64;

    while power_of_ten(exponent) > *magnitude {
        exponent -= 1;
    }

    while power_of_ten(exponent + 1) <= *magnitude {
        exponent += 1;
    }

    (exponent, rounded_digits(magnitude, digits - 1 - exponent))
}

fn rounded_digits(magnitude: &Rational, shift: i64) -> String {
    let scaled = magnitude * power_of_ten(shift);

    Integer::rounding_from(scaled, RoundingMode::Nearest)
        .0
        .to_string()
}

fn positional(significant: &str, exponent: i64) -> String {
    if exponent < 0 {
        let zeros = "0".repeat((-exponent - 1) as usize);

        return format!("0.{zeros}{significant}");
    }

    let int_width = (exponent + 1) as usize;

    if significant.len() <= int_width {
        let zeros = "0".repeat(int_width - significant.len());

        format!("{significant}{zeros}.0")
    } else {
        let (integer, fraction) = significant.split_at(int_width);

        format!("{integer}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_digits() {
        assert!(matches!(
            Precision::new(0),
            Err(ApproxError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn binary_width() {
        assert_eq!(Precision::new(15).unwrap().bits(), 53);
        assert_eq!(Precision::new(50).unwrap().bits(), 169);
    }

    #[test]
    fn rejects_oversized_digits() {
        for digits in [600_000_000, u32::MAX] {
            assert!(matches!(
                Precision::new(digits),
                Err(ApproxError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn rounding_is_relative() {
        let prec = Precision::new(15).unwrap();

        let third = prec.round(Rational::from_signeds(1, 3));
        let scaled = prec.round(Rational::from_signeds(1 << 20, 3));

        let error = &third - Rational::from_signeds(1, 3);

        assert_eq!(third * Rational::from(1 << 20), scaled);
        assert!(prec.is_negligible(&error));
    }

    #[test]
    fn tolerance_follows_digits() {
        let prec = Precision::new(30).unwrap();

        assert_eq!(prec.tolerance(), &power_of_ten(-15));
        assert!(prec.is_negligible(&power_of_ten(-16)));
        assert!(!prec.is_negligible(&power_of_ten(-14)));
    }

    #[test]
    fn decimal_rendering() {
        let prec = Precision::new(10).unwrap();

        assert_eq!(prec.to_decimal(&Rational::from(0)), "0.0");
        assert_eq!(prec.to_decimal(&Rational::from(3)), "3.0");
        assert_eq!(prec.to_decimal(&Rational::from(-120)), "-120.0");
        assert_eq!(prec.to_decimal(&Rational::from_signeds(1, 4)), "0.25");
        assert_eq!(
            prec.to_decimal(&Rational::from_signeds(2, 3)),
            "0.6666666667"
        );
        assert_eq!(
            prec.to_decimal(&Rational::from_signeds(1, 1000)),
            "0.001"
        );
        assert_eq!(prec.to_decimal(&power_of_ten(-7)), "1.0e-7");
        assert_eq!(prec.to_decimal(&power_of_ten(12)), "1.0e12");
        assert_eq!(
            prec.to_decimal(&Rational::from(9_999_999_999_999i64)),
            "1.0e13"
        );
    }

    #[test]
    fn literal_parsing() {
        let prec = Precision::new(20).unwrap();

        assert_eq!(prec.parse("-1.5"), Some(Rational::from_signeds(-3, 2)));
        assert_eq!(
            prec.parse("2.5e-3"),
            Some(prec.round(Rational::from_signeds(1, 400)))
        );
        assert_eq!(prec.parse("abc"), None);
        assert_eq!(prec.from_f64(0.375), Some(Rational::from_signeds(3, 8)));
        assert_eq!(prec.from_f64(f64::NAN), None);
    }
}
