//! Results of an approximation run.

use std::fmt;

use itertools::Itertools;
use malachite::num::arithmetic::traits::Abs;
use malachite::num::basic::traits::Zero;
use malachite::num::conversion::traits::RoundingFrom;
use malachite::rounding_modes::RoundingMode;
use malachite::Rational;

use crate::error::ApproxError;
use crate::functions::ScalarFn;
use crate::precision::Precision;
use crate::sampler::{Sample, Sampler, Spacing, Weights};
use crate::simplex::{Cause, Status};

/// A polynomial in the monomial basis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    /// Lowest power first.
    coefficients: Vec<Rational>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<Rational>) -> Polynomial {
        Polynomial { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[Rational] {
        &self.coefficients
    }

    /// Coefficients from the highest power down.
    pub fn descending(&self) -> Vec<Rational> {
        self.coefficients.iter().rev().cloned().collect()
    }

    /// Evaluates the polynomial with Horner's scheme.
    pub fn eval(&self, x: &Rational, prec: &Precision) -> Rational {
        self.coefficients
            .iter()
            .rev()
            .fold(Rational::ZERO, |acc, c| prec.add(&prec.mul(&acc, x), c))
    }

    /// Largest `|p(x_i) - f(x_i)|` over the samples.
    pub fn max_deviation(
        &self,
        samples: &[Sample],
        prec: &Precision,
    ) -> Rational {
        samples
            .iter()
            .map(|sample| {
                let p = self.eval(&sample.x, prec);
                prec.sub(&p, &sample.f_value).abs()
            })
            .max()
            .unwrap_or(Rational::ZERO)
    }
}

/// Status report of the last solve.
#[derive(Clone, Debug)]
pub struct Report {
    pub status: Status,
    /// Lowest power first, present when optimal.
    pub coefficients: Option<Vec<Rational>>,
    pub objective: Option<Rational>,
    /// Largest deviation from the target over the samples, when optimal.
    pub deviation: Option<Rational>,
    pub iterations: usize,
    pub cause: Option<Cause>,
    pub precision: Precision,
}

impl Report {
    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prec = &self.precision;

        writeln!(f, "Status: {}", self.status)?;

        if let Some(cause) = &self.cause {
            writeln!(f, "Cause: {cause}")?;
        }

        if let Some(coefficients) = &self.coefficients {
            writeln!(
                f,
                "Coefficients: [{}]",
                coefficients.iter().map(|c| prec.to_decimal(c)).join(", ")
            )?;
        }

        writeln!(f, "Iterations: {}", self.iterations)?;

        if let Some(deviation) = &self.deviation {
            writeln!(f, "Error: {}", prec.to_decimal(deviation))?;
        }

        Ok(())
    }
}

/// One row of a comparison between a function and its approximation.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonPoint {
    pub x: f64,
    pub f_value: f64,
    pub p_value: f64,
    pub error: f64,
}

impl fmt::Display for ComparisonPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>24e} {:>24e} {:>24e} {:>24e}",
            self.x, self.f_value, self.p_value, self.error
        )
    }
}

/// Evaluates `f` and the polynomial at `n` evenly spaced points of `[a, b]`.
pub fn comparison(
    f: &dyn ScalarFn,
    coefficients: &[Rational],
    (a, b): (&Rational, &Rational),
    n: usize,
    prec: &Precision,
) -> Result<Vec<ComparisonPoint>, ApproxError> {
    let samples = Sampler::new(prec, Spacing::Uniform).sample(
        f,
        0,
        (a, b),
        n,
        &Weights::none(),
    )?;
    let poly = Polynomial::new(coefficients.to_vec());

    let points = samples
        .iter()
        .map(|sample| {
            let p_value = poly.eval(&sample.x, prec);
            let error = prec.sub(&p_value, &sample.f_value);

            ComparisonPoint {
                x: to_f64(&sample.x),
                f_value: to_f64(&sample.f_value),
                p_value: to_f64(&p_value),
                error: to_f64(&error),
            }
        })
        .collect();

    Ok(points)
}

fn to_f64(x: &Rational) -> f64 {
    f64::rounding_from(x, RoundingMode::Nearest).0
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::functions::scalar_fn;

    fn poly(coefficients: &[i64]) -> Polynomial {
        Polynomial::new(
            coefficients.iter().map(|&c| Rational::from(c)).collect(),
        )
    }

    #[test]
    fn horner() {
        let prec = Precision::new(20).unwrap();
        let p = poly(&[1, -2, 3]);

        assert_eq!(p.degree(), 2);
        assert_eq!(p.eval(&Rational::from(2), &prec), Rational::from(9));
        assert_eq!(p.eval(&Rational::from(0), &prec), Rational::from(1));
        assert_eq!(p.descending(), poly(&[3, -2, 1]).coefficients);
    }

    #[test]
    fn deviation() {
        let prec = Precision::new(20).unwrap();
        let p = poly(&[0, 1]);

        let samples: Vec<_> = [(0, 1), (1, 1), (2, 1)]
            .iter()
            .map(|&(x, f)| Sample {
                x: Rational::from(x),
                f_value: Rational::from(f),
                bounds: None,
            })
            .collect();

        assert_eq!(p.max_deviation(&samples, &prec), Rational::from(1));
    }

    #[test]
    fn display() {
        let report = Report {
            status: Status::Optimal,
            coefficients: Some(vec![
                Rational::from(1),
                Rational::from_signeds(1, 2),
            ]),
            objective: Some(Rational::from_signeds(1, 4)),
            deviation: Some(Rational::from_signeds(1, 4)),
            iterations: 3,
            cause: None,
            precision: Precision::new(10).unwrap(),
        };

        assert_eq!(
            report.to_string(),
            "Status: optimal\n\
             Coefficients: [1.0, 0.5]\n\
             Iterations: 3\n\
             Error: 0.25\n"
        );
    }

    #[test]
    fn comparison_table() {
        let prec = Precision::new(20).unwrap();
        let f = scalar_fn(|x, prec| Ok(prec.mul(x, x)));
        let coefficients = [Rational::from(0), Rational::from(1)];

        let table = comparison(
            &f,
            &coefficients,
            (&Rational::from(0), &Rational::from(1)),
            3,
            &prec,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table[1].x, 0.5);
        assert_eq!(table[1].p_value, 0.5);
        assert_eq!(table[1].error, 0.25);
    }
}
