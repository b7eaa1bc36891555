//! Elementary functions evaluated to a given precision.
//!
//! Each function works internally at a higher precision and rounds its result
//! once, so that results are correct to within a few units in the last place
//! of the requested precision.

use std::cmp::{self, Ordering};

use malachite::num::arithmetic::traits::{PowerOf2, Sign};
use malachite::num::basic::traits::{One, Two, Zero};
use malachite::num::conversion::traits::RoundingFrom;
use malachite::rounding_modes::RoundingMode;
use malachite::{Integer, Rational};

use crate::error::EvalError;
use crate::precision::Precision;

const GUARD_BITS: u32 = 32;

/// Argument halvings applied before summing the sine and cosine series.
const TRIG_HALVINGS: u32 = 8;

/// Computes `π`.
pub fn pi(prec: &Precision) -> Rational {
    let work = prec.with_guard_bits(GUARD_BITS);

    // Machin's formula.
    let a = atan_inverse(5, &work);
    let b = atan_inverse(239, &work);

    prec.round(Rational::from(16) * a - Rational::from(4) * b)
}

/// Computes `e^x`.
pub fn exp(x: &Rational, prec: &Precision) -> Rational {
    if x.sign() == Ordering::Equal {
        return Rational::ONE;
    }

    let halvings = cmp::max(x.floor_log_base_2_abs() + 12, 0) as u32;
    let work = prec.with_guard_bits(GUARD_BITS + halvings);

    let r = x * Rational::power_of_2(-i64::from(halvings));
    let cutoff = -i64::from(work.bits()) - 2;

    let mut sum = Rational::ONE;
    let mut term = Rational::ONE;

    for n in 1u32.. {
        term = work.round(term * &r / Rational::from(n));

        if is_below(&term, cutoff) {
            break;
        }

        sum += &term;
    }

    for _ in 0..halvings {
        sum = work.mul(&sum, &sum);
    }

    prec.round(sum)
}

/// Computes the natural logarithm of `x`.
pub fn ln(x: &Rational, prec: &Precision) -> Result<Rational, EvalError> {
    if x.sign() != Ordering::Greater {
        return Err(EvalError::OutOfDomain("log"));
    }

    let e = x.floor_log_base_2_abs();
    let work = prec.with_guard_bits(GUARD_BITS + 64);

    // x = m * 2^e with 1 <= m < 2
    let m = x * Rational::power_of_2(-e);
    let s = work.div(&(&m - Rational::ONE), &(&m + Rational::ONE));

    let ln_m = Rational::TWO * atanh(&s, &work);
    let ln_2 = Rational::TWO * atanh(&Rational::from_signeds(1, 3), &work);

    Ok(prec.round(ln_m + Rational::from(e) * ln_2))
}

/// Computes `sin(x)` and `cos(x)`.
pub fn sin_cos(x: &Rational, prec: &Precision) -> (Rational, Rational) {
    if x.sign() == Ordering::Equal {
        return (Rational::ZERO, Rational::ONE);
    }

    let magnitude_bits = cmp::max(x.floor_log_base_2_abs(), 0) as u32;
    let work =
        prec.with_guard_bits(GUARD_BITS + TRIG_HALVINGS + magnitude_bits);

    let two_pi = Rational::TWO * pi(&work);
    let turns = Integer::rounding_from(x / &two_pi, RoundingMode::Nearest).0;
    let reduced = work.round(x - Rational::from(turns) * two_pi);

    if reduced.sign() == Ordering::Equal {
        return (Rational::ZERO, Rational::ONE);
    }

    let r = reduced * Rational::power_of_2(-i64::from(TRIG_HALVINGS));
    let r2 = work.mul(&r, &r);
    let cutoff = -i64::from(work.bits()) - 4;

    let mut sin = r.clone();
    let mut term = r.clone();
    let sin_cutoff = r.floor_log_base_2_abs() + cutoff;

    for n in 1u32.. {
        let k = 2 * n;
        term = -work.round(term * &r2 / Rational::from(k * (k + 1)));

        if is_below(&term, sin_cutoff) {
            break;
        }

        sin += &term;
    }

    let mut cos = Rational::ONE;
    let mut term = Rational::ONE;

    for n in 1u32.. {
        let k = 2 * n;
        term = -work.round(term * &r2 / Rational::from((k - 1) * k));

        if is_below(&term, cutoff) {
            break;
        }

        cos += &term;
    }

    for _ in 0..TRIG_HALVINGS {
        let s = work.round(Rational::TWO * &sin * &cos);
        let c = work.round(&cos * &cos - &sin * &sin);

        sin = s;
        cos = c;
    }

    (prec.round(sin), prec.round(cos))
}

pub fn sin(x: &Rational, prec: &Precision) -> Rational {
    sin_cos(x, prec).0
}

pub fn cos(x: &Rational, prec: &Precision) -> Rational {
    sin_cos(x, prec).1
}

pub fn tan(x: &Rational, prec: &Precision) -> Result<Rational, EvalError> {
    let work = prec.with_guard_bits(GUARD_BITS);
    let (sin, cos) = sin_cos(x, &work);

    if is_below(&cos, -i64::from(work.bits())) {
        return Err(EvalError::OutOfDomain("tan"));
    }

    Ok(prec.div(&sin, &cos))
}

/// Computes the square root of `x` by Newton's iteration from above.
pub fn sqrt(x: &Rational, prec: &Precision) -> Result<Rational, EvalError> {
    match x.sign() {
        Ordering::Less => return Err(EvalError::OutOfDomain("sqrt")),
        Ordering::Equal => return Ok(Rational::ZERO),
        Ordering::Greater => {}
    }

    let work = prec.with_guard_bits(GUARD_BITS);
    let e = x.floor_log_base_2_abs();

    // 2^(floor(e / 2) + 1) >= sqrt(x)
    let mut y = Rational::power_of_2(e.div_euclid(2) + 1);

    loop {
        let next = work.round((&y + work.div(x, &y)) / Rational::TWO);

        if next >= y {
            break;
        }

        y = next;
    }

    Ok(prec.round(y))
}

/// Computes `x^n` by binary exponentiation.
pub fn powi(
    x: &Rational,
    n: i64,
    prec: &Precision,
) -> Result<Rational, EvalError> {
    if n < 0 && x.sign() == Ordering::Equal {
        return Err(EvalError::DivisionByZero);
    }

    let work = prec.with_guard_bits(GUARD_BITS);

    let mut base = x.clone();
    let mut exponent = n.unsigned_abs();
    let mut result = Rational::ONE;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = work.mul(&result, &base);
        }

        exponent >>= 1;

        if exponent > 0 {
            base = work.mul(&base, &base);
        }
    }

    if n < 0 {
        Ok(prec.div(&Rational::ONE, &result))
    } else {
        Ok(prec.round(result))
    }
}

/// Computes `x^y`, using [`powi`] whenever `y` is an integer.
pub fn pow(
    x: &Rational,
    y: &Rational,
    prec: &Precision,
) -> Result<Rational, EvalError> {
    if let Ok(n) = i64::try_from(y) {
        return powi(x, n, prec);
    }

    match x.sign() {
        Ordering::Greater => {
            let work = prec.with_guard_bits(GUARD_BITS);
            let log = ln(x, &work)?;

            Ok(exp(&work.mul(y, &log), prec))
        }
        Ordering::Equal if y.sign() == Ordering::Greater => Ok(Rational::ZERO),
        _ => Err(EvalError::OutOfDomain("pow")),
    }
}

/// Sums `atanh(s) = s + s^3/3 + s^5/5 + ...` for `|s| < 1`.
fn atanh(s: &Rational, work: &Precision) -> Rational {
    odd_power_series(s, work, false)
}

/// Computes `atan(1/k)`.
fn atan_inverse(k: u32, work: &Precision) -> Rational {
    odd_power_series(&Rational::from_unsigneds(1u32, k), work, true)
}

fn odd_power_series(
    s: &Rational,
    work: &Precision,
    alternating: bool,
) -> Rational {
    if s.sign() == Ordering::Equal {
        return Rational::ZERO;
    }

    let s2 = work.mul(s, s);
    let cutoff = s.floor_log_base_2_abs() - i64::from(work.bits()) - 4;

    let mut power = s.clone();
    let mut sum = s.clone();

    for n in 1u32.. {
        power = work.mul(&power, &s2);

        if alternating {
            power = -power;
        }

        let term = work.round(&power / Rational::from(2 * n + 1));

        if is_below(&term, cutoff) {
            break;
        }

        sum += term;
    }

    work.round(sum)
}

/// Tests whether `|x| < 2^position`.
fn is_below(x: &Rational, position: i64) -> bool {
    x.sign() == Ordering::Equal || x.floor_log_base_2_abs() < position
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: &Rational, expected: &str, prec: &Precision) -> bool {
        let expected = prec.parse(expected).unwrap();
        let error = actual - &expected;

        is_below(&error, -i64::from(prec.bits()) + 4)
    }

    #[test]
    fn constants() {
        let prec = Precision::new(50).unwrap();

        assert!(close(
            &pi(&prec),
            "3.14159265358979323846264338327950288419716939937510",
            &prec
        ));
        assert!(close(
            &exp(&Rational::ONE, &prec),
            "2.71828182845904523536028747135266249775724709369995",
            &prec
        ));
        assert!(close(
            &ln(&Rational::TWO, &prec).unwrap(),
            "0.693147180559945309417232121458176568075500134360255",
            &prec
        ));
        assert!(close(
            &sqrt(&Rational::TWO, &prec).unwrap(),
            "1.41421356237309504880168872420969807856967187537694",
            &prec
        ));
    }

    #[test]
    fn trigonometry() {
        let prec = Precision::new(40).unwrap();
        let (s, c) = sin_cos(&Rational::ONE, &prec);

        assert!(close(&s, "0.8414709848078965066525023216302989996226", &prec));
        assert!(close(&c, "0.5403023058681397174009366074429766037323", &prec));

        let (s, c) = sin_cos(&Rational::from(10), &prec);

        assert!(close(
            &s,
            "-0.5440211108893698134047476618513772816836",
            &prec
        ));
        assert!(close(
            &c,
            "-0.8390715290764524522588639478240648345199",
            &prec
        ));
    }

    #[test]
    fn exp_and_log_are_inverse() {
        let prec = Precision::new(30).unwrap();
        let x = Rational::from_signeds(-37, 8);

        let y = ln(&exp(&x, &prec), &prec).unwrap();

        assert!(close(&y, "-4.625", &prec));
    }

    #[test]
    fn domain_errors() {
        let prec = Precision::new(20).unwrap();

        assert_eq!(
            ln(&Rational::ZERO, &prec),
            Err(EvalError::OutOfDomain("log"))
        );
        assert_eq!(
            sqrt(&Rational::from(-1), &prec),
            Err(EvalError::OutOfDomain("sqrt"))
        );
        assert_eq!(
            powi(&Rational::ZERO, -2, &prec),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn integer_powers() {
        let prec = Precision::new(20).unwrap();
        let half = Rational::from_signeds(1, 2);

        assert_eq!(
            powi(&half, 10, &prec).unwrap(),
            Rational::from_signeds(1, 1024)
        );
        assert_eq!(powi(&half, -3, &prec).unwrap(), Rational::from(8));
        assert_eq!(
            pow(&Rational::from(3), &Rational::from(4), &prec).unwrap(),
            Rational::from(81)
        );
        assert!(close(
            &pow(&Rational::from(2), &half, &prec).unwrap(),
            "1.4142135623730950488",
            &prec
        ));
    }
}
