//! The approximation entry point.

use malachite::Rational;

use crate::error::ApproxError;
use crate::functions::ScalarFn;
use crate::lp::{self, Formulation};
use crate::precision::Precision;
use crate::report::{Polynomial, Report};
use crate::sampler::{Sample, Sampler, Spacing, Weights};
use crate::simplex::RevisedSimplex;

/// Computes best polynomial approximations on a discretized interval.
///
/// ```
/// use malachite::Rational;
/// use optimal_poly::functions::scalar_fn;
/// use optimal_poly::{OptimalPolynomial, Weights};
///
/// let mut opt = OptimalPolynomial::new(30).unwrap();
/// let square = scalar_fn(|x, prec| Ok(prec.mul(x, x)));
///
/// let (a, b) = (Rational::from(-1), Rational::from(1));
///
/// let coefs = opt
///     .get_coefs(&square, 2, &a, &b, 3, &Weights::none())
///     .unwrap();
///
/// assert_eq!(coefs.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct OptimalPolynomial {
    precision: Precision,
    spacing: Spacing,
    formulation: Formulation,
    max_iterations: Option<usize>,
    last: Option<Report>,
    samples: Vec<Sample>,
}

impl OptimalPolynomial {
    /// Creates an optimizer working with `digits` significant decimal digits.
    pub fn new(digits: u32) -> Result<OptimalPolynomial, ApproxError> {
        Ok(OptimalPolynomial::with_precision(Precision::new(digits)?))
    }

    pub fn with_precision(precision: Precision) -> OptimalPolynomial {
        OptimalPolynomial {
            precision,
            spacing: Spacing::default(),
            formulation: Formulation::default(),
            max_iterations: None,
            last: None,
            samples: Vec::new(),
        }
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> OptimalPolynomial {
        self.spacing = spacing;
        self
    }

    pub fn with_formulation(
        mut self,
        formulation: Formulation,
    ) -> OptimalPolynomial {
        self.formulation = formulation;
        self
    }

    pub fn with_max_iterations(mut self, limit: usize) -> OptimalPolynomial {
        self.max_iterations = Some(limit);
        self
    }

    pub fn precision(&self) -> &Precision {
        &self.precision
    }

    /// Finds the coefficients, lowest power first, of the degree `degree`
    /// polynomial that best fits `f` at `num` points of `[a, b]`.
    ///
    /// Input errors are raised before the solver runs and leave no report.
    /// Any non-optimal solver outcome is returned as [`ApproxError::Solver`]
    /// and remains available through [`OptimalPolynomial::status`].
    pub fn get_coefs(
        &mut self,
        f: &dyn ScalarFn,
        degree: usize,
        a: &Rational,
        b: &Rational,
        num: usize,
        weights: &Weights,
    ) -> Result<Vec<Rational>, ApproxError> {
        self.last = None;
        self.samples.clear();

        let prec = &self.precision;

        let a = prec.round(a.clone());
        let b = prec.round(b.clone());

        let samples = Sampler::new(prec, self.spacing)
            .sample(f, degree, (&a, &b), num, weights)?;

        let instance = lp::build(&samples, degree, self.formulation, prec)?;

        log::debug!(
            "degree {} on [{}, {}] with {} {} points at {} digits",
            degree,
            prec.to_decimal(&a),
            prec.to_decimal(&b),
            num,
            self.spacing,
            prec.digits()
        );

        let mut solver = RevisedSimplex::new(&instance.program, prec);

        if let Some(limit) = self.max_iterations {
            solver = solver.with_max_iterations(limit);
        }

        let solution = solver.solve();

        let coefficients = solution.values.as_ref().map(|values| {
            instance
                .coefficients
                .iter()
                .map(|var| values[var.idx()].clone())
                .collect::<Vec<_>>()
        });

        let deviation = coefficients
            .as_ref()
            .map(|c| Polynomial::new(c.clone()).max_deviation(&samples, prec));

        let report = Report {
            status: solution.status,
            coefficients,
            objective: solution.objective,
            deviation,
            iterations: solution.iterations,
            cause: solution.cause,
            precision: prec.clone(),
        };

        self.samples = samples;

        match &report.coefficients {
            Some(coefficients) if report.is_optimal() => {
                let coefficients = coefficients.clone();
                self.last = Some(report);

                Ok(coefficients)
            }
            _ => {
                log::warn!("approximation failed: {}", report.status);

                self.last = Some(report.clone());

                Err(ApproxError::Solver(Box::new(report)))
            }
        }
    }

    /// Report of the last call to [`OptimalPolynomial::get_coefs`] that
    /// reached the solver.
    pub fn status(&self) -> Option<&Report> {
        self.last.as_ref()
    }

    /// Samples of the last call that reached the solver.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
