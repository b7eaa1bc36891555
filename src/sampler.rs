//! Discretization of the approximation interval.

use malachite::num::basic::traits::One;
use malachite::Rational;
use strum_macros::{Display, EnumString};

use crate::error::{ApproxError, Role};
use crate::functions::{elementary, Constant, ScalarFn};
use crate::precision::Precision;

/// Placement of the sample points within the interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Spacing {
    /// Evenly spaced points, endpoints included.
    #[default]
    Uniform,
    /// Chebyshev nodes of the first kind, endpoints excluded.
    Chebyshev,
}

/// Optional weight functions bounding the approximation around the target.
#[derive(Clone, Copy, Default)]
pub struct Weights<'w> {
    pub sup: Option<&'w dyn ScalarFn>,
    pub inf: Option<&'w dyn ScalarFn>,
}

impl<'w> Weights<'w> {
    pub fn none() -> Weights<'w> {
        Weights::default()
    }

    pub fn new(sup: &'w dyn ScalarFn, inf: &'w dyn ScalarFn) -> Weights<'w> {
        Weights {
            sup: Some(sup),
            inf: Some(inf),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sup.is_none() && self.inf.is_none()
    }
}

/// Weight values and the bounds they induce at one sample point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub sup_weight: Rational,
    pub inf_weight: Rational,
    /// `f(x) * omega_sup(x)`
    pub upper: Rational,
    /// `f(x) * omega_inf(x)`
    pub lower: Rational,
}

/// The target function evaluated at one point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    pub x: Rational,
    pub f_value: Rational,
    /// Present exactly when weight functions were supplied.
    pub bounds: Option<Bounds>,
}

impl Sample {
    pub fn upper_bound(&self) -> Option<&Rational> {
        self.bounds.as_ref().map(|bounds| &bounds.upper)
    }

    pub fn lower_bound(&self) -> Option<&Rational> {
        self.bounds.as_ref().map(|bounds| &bounds.lower)
    }
}

pub struct Sampler<'p> {
    prec: &'p Precision,
    spacing: Spacing,
}

impl<'p> Sampler<'p> {
    pub fn new(prec: &'p Precision, spacing: Spacing) -> Sampler<'p> {
        Sampler { prec, spacing }
    }

    /// Evaluates `f`, and the weights if any, at `num` points of `[a, b]`.
    ///
    /// A missing weight defaults to the constant 1.
    pub fn sample(
        &self,
        f: &dyn ScalarFn,
        degree: usize,
        (a, b): (&Rational, &Rational),
        num: usize,
        weights: &Weights,
    ) -> Result<Vec<Sample>, ApproxError> {
        if a >= b {
            return Err(ApproxError::InvalidInterval {
                a: a.clone(),
                b: b.clone(),
            });
        }

        if num < degree + 1 {
            return Err(ApproxError::UnderdeterminedSystem {
                points: num,
                coefficients: degree + 1,
            });
        }

        let one: &dyn ScalarFn = &Constant(Rational::ONE);
        let weight_fns = (!weights.is_empty())
            .then(|| (weights.sup.unwrap_or(one), weights.inf.unwrap_or(one)));

        self.points(a, b, num)
            .into_iter()
            .enumerate()
            .map(|(index, x)| {
                let f_value = self.evaluate(f, Role::Target, index, &x)?;

                let bounds = match weight_fns {
                    Some((sup, inf)) => {
                        let sup_weight =
                            self.evaluate(sup, Role::UpperWeight, index, &x)?;
                        let inf_weight =
                            self.evaluate(inf, Role::LowerWeight, index, &x)?;

                        Some(Bounds {
                            upper: self.prec.mul(&f_value, &sup_weight),
                            lower: self.prec.mul(&f_value, &inf_weight),
                            sup_weight,
                            inf_weight,
                        })
                    }
                    None => None,
                };

                Ok(Sample { x, f_value, bounds })
            })
            .collect()
    }

    /// Generates `num` ascending points in `[a, b]`.
    pub fn points(
        &self,
        a: &Rational,
        b: &Rational,
        num: usize,
    ) -> Vec<Rational> {
        let prec = self.prec;

        if num == 1 {
            return vec![prec.round((a + b) / Rational::from(2))];
        }

        match self.spacing {
            Spacing::Uniform => {
                let width = b - a;
                let intervals = Rational::from(num - 1);

                (0..num)
                    .map(|i| {
                        let offset = &width * Rational::from(i) / &intervals;
                        prec.round(a + offset)
                    })
                    .collect()
            }
            Spacing::Chebyshev => {
                let work = prec.with_guard_bits(16);

                let pi = elementary::pi(&work);
                let center = (a + b) / Rational::from(2);
                let radius = (b - a) / Rational::from(2);
                let nodes = Rational::from(2 * num);

                // k = num - 1 gives the leftmost node.
                (0..num)
                    .rev()
                    .map(|k| {
                        let odd = Rational::from(2 * k + 1);
                        let angle = work.round(odd * &pi / &nodes);
                        let cos = elementary::cos(&angle, &work);

                        prec.round(&center + &radius * cos)
                    })
                    .collect()
            }
        }
    }

    fn evaluate(
        &self,
        f: &dyn ScalarFn,
        role: Role,
        index: usize,
        x: &Rational,
    ) -> Result<Rational, ApproxError> {
        f.eval(x, self.prec)
            .map(|value| self.prec.round(value))
            .map_err(|source| ApproxError::Evaluation {
                role,
                index,
                point: x.clone(),
                source,
            })
    }
}
