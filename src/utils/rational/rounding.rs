use std::cmp::Ordering;

use malachite::num::arithmetic::traits::{RoundToMultipleOfPowerOf2, Sign};
use malachite::rounding_modes::RoundingMode;
use malachite::Rational;

pub trait RoundBinary: Sized {
    type Output;

    /// Rounds to a multiple of `2^position`.
    fn round(self, position: i64, mode: RoundingMode) -> Self::Output;
}

impl<T> RoundBinary for T
where
    T: RoundToMultipleOfPowerOf2<i64>,
{
    type Output = T::Output;

    fn round(self, position: i64, mode: RoundingMode) -> Self::Output {
        self.round_to_multiple_of_power_of_2(position, mode).0
    }
}

/// Rounds `x` to `bits` significant binary digits.
pub fn round_significant(
    x: Rational,
    bits: u32,
    mode: RoundingMode,
) -> Rational {
    if x.sign() == Ordering::Equal {
        return x;
    }

    let msb = x.floor_log_base_2_abs();

    x.round(msb + 1 - i64::from(bits), mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    use malachite::num::conversion::traits::FromSciString;

    #[test]
    fn significant_rounding() {
        assert_eq!(
            round_significant(
                Rational::from(0b10111),
                3,
                RoundingMode::Nearest
            ),
            Rational::from(0b11000)
        );
        assert_eq!(
            round_significant(Rational::from(-0b10111), 3, RoundingMode::Floor),
            Rational::from(-0b11000)
        );
        assert_eq!(
            round_significant(Rational::from(0b10111), 3, RoundingMode::Down),
            Rational::from(0b10100)
        );
        assert_eq!(
            round_significant(
                Rational::from_signeds(1, 3),
                4,
                RoundingMode::Nearest
            ),
            Rational::from_signeds(11, 32)
        );
        assert_eq!(
            round_significant(Rational::from(0), 4, RoundingMode::Nearest),
            Rational::from(0)
        );
    }

    #[test]
    fn positional_rounding() {
        let x = Rational::from_sci_string("1.25").unwrap();

        assert_eq!(
            x.clone().round(-1, RoundingMode::Floor),
            Rational::from(1)
        );
        assert_eq!(
            x.clone().round(-1, RoundingMode::Ceiling),
            Rational::from_signeds(3, 2)
        );
        assert_eq!(x.round(0, RoundingMode::Nearest), Rational::from(1));
    }
}
