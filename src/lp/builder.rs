//! Construction of the approximation LP from function samples.

use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;
use strum_macros::{Display, EnumString};

use super::{BoundKind, Domain, LinearProgram, Relation, RowTag, Variable};
use crate::error::ApproxError;
use crate::precision::Precision;
use crate::sampler::Sample;

/// How the sample rows constrain the polynomial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
pub enum Formulation {
    /// Minimize the largest `|p(x_i) - f(x_i)|`, keeping `p(x_i)` inside the
    /// weight bounds when they are given.
    #[default]
    #[strum(serialize = "minimax")]
    Minimax,
    /// Minimize `t` subject to
    /// `f(x_i) - omega_sup(x_i) t <= p(x_i) <= f(x_i) + omega_inf(x_i) t`.
    #[strum(serialize = "weighted")]
    WeightedDeviation,
    /// Require `p(x_i) = f(x_i)` exactly.
    #[strum(serialize = "interpolation")]
    Interpolation,
}

/// A built LP together with the location of its unknowns.
#[derive(Clone, Debug)]
pub struct LpInstance {
    pub program: LinearProgram,
    /// Polynomial coefficients, lowest power first.
    pub coefficients: Vec<Variable>,
    /// The deviation bound `t`, absent for interpolation.
    pub deviation: Option<Variable>,
}

pub fn build(
    samples: &[Sample],
    degree: usize,
    formulation: Formulation,
    prec: &Precision,
) -> Result<LpInstance, ApproxError> {
    if samples.len() < degree + 1 {
        return Err(ApproxError::UnderdeterminedSystem {
            points: samples.len(),
            coefficients: degree + 1,
        });
    }

    let bounded = formulation != Formulation::WeightedDeviation;

    if bounded {
        check_bounds(samples)?;
    }

    let mut program = LinearProgram::new();

    let coefficients: Vec<_> = (0..=degree)
        .map(|_| program.add_var(Rational::ZERO, Domain::Free))
        .collect();

    let deviation = (formulation != Formulation::Interpolation)
        .then(|| program.add_var(Rational::ONE, Domain::NonNegative));

    for (index, sample) in samples.iter().enumerate() {
        let powers = monomials(&sample.x, degree, prec);
        let row = || coefficients.iter().copied().zip(powers.iter().cloned());
        let tag = |kind| Some(RowTag { sample: index, kind });

        match (formulation, deviation) {
            (Formulation::Minimax, Some(t)) => {
                program.add_constraint(
                    row().chain([(t, -Rational::ONE)]),
                    Relation::Le,
                    sample.f_value.clone(),
                    tag(BoundKind::Above),
                );
                program.add_constraint(
                    row().chain([(t, Rational::ONE)]),
                    Relation::Ge,
                    sample.f_value.clone(),
                    tag(BoundKind::Below),
                );
            }
            (Formulation::WeightedDeviation, Some(t)) => {
                let (sup, inf) = match &sample.bounds {
                    Some(bounds) => {
                        (bounds.sup_weight.clone(), bounds.inf_weight.clone())
                    }
                    None => (Rational::ONE, Rational::ONE),
                };

                program.add_constraint(
                    row().chain([(t, -inf)]),
                    Relation::Le,
                    sample.f_value.clone(),
                    tag(BoundKind::Above),
                );
                program.add_constraint(
                    row().chain([(t, sup)]),
                    Relation::Ge,
                    sample.f_value.clone(),
                    tag(BoundKind::Below),
                );
            }
            _ => {
                program.add_constraint(
                    row(),
                    Relation::Eq,
                    sample.f_value.clone(),
                    tag(BoundKind::Exact),
                );
            }
        }

        if let (true, Some(bounds)) = (bounded, &sample.bounds) {
            program.add_constraint(
                row(),
                Relation::Le,
                bounds.upper.clone(),
                tag(BoundKind::Upper),
            );
            program.add_constraint(
                row(),
                Relation::Ge,
                bounds.lower.clone(),
                tag(BoundKind::Lower),
            );
        }
    }

    log::debug!(
        "built {} LP: {} variables, {} constraints",
        formulation,
        program.num_vars(),
        program.num_constraints()
    );

    Ok(LpInstance {
        program,
        coefficients,
        deviation,
    })
}

fn check_bounds(samples: &[Sample]) -> Result<(), ApproxError> {
    let contradiction = samples.iter().enumerate().find_map(|(index, sample)| {
        sample
            .bounds
            .as_ref()
            .filter(|bounds| bounds.lower > bounds.upper)
            .map(|bounds| (index, sample, bounds))
    });

    match contradiction {
        Some((index, sample, bounds)) => {
            Err(ApproxError::InfeasibleByConstruction {
                index,
                point: sample.x.clone(),
                lower: bounds.lower.clone(),
                upper: bounds.upper.clone(),
            })
        }
        None => Ok(()),
    }
}

/// `[1, x, x^2, ..., x^degree]`
fn monomials(x: &Rational, degree: usize, prec: &Precision) -> Vec<Rational> {
    let mut powers = Vec::with_capacity(degree + 1);
    let mut power = Rational::ONE;

    for _ in 0..degree {
        let next = prec.mul(&power, x);
        powers.push(power);
        power = next;
    }

    powers.push(power);
    powers
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sampler::Bounds;

    fn sample(x: i64, f: i64) -> Sample {
        Sample {
            x: Rational::from(x),
            f_value: Rational::from(f),
            bounds: None,
        }
    }

    fn bounded(x: i64, f: i64, sup: i64, inf: i64) -> Sample {
        Sample {
            bounds: Some(Bounds {
                sup_weight: Rational::from(sup),
                inf_weight: Rational::from(inf),
                upper: Rational::from(f * sup),
                lower: Rational::from(f * inf),
            }),
            ..sample(x, f)
        }
    }

    #[test]
    fn minimax_rows() {
        let prec = Precision::new(20).unwrap();
        let samples = [sample(-1, 1), sample(0, 0), sample(1, 1)];

        let lp = build(&samples, 2, Formulation::Minimax, &prec).unwrap();
        let program = &lp.program;

        assert_eq!(program.num_vars(), 4);
        assert_eq!(program.num_constraints(), 6);
        assert_eq!(lp.deviation, Some(Variable(3)));
        assert_eq!(program.domain(Variable(0)), Domain::Free);
        assert_eq!(program.domain(Variable(3)), Domain::NonNegative);
        assert_eq!(
            program.objective(),
            &[Rational::ZERO, Rational::ZERO, Rational::ZERO, Rational::ONE]
        );

        let above = &program.constraints()[0];
        let coeffs: Vec<_> =
            above.terms.iter().map(|(_, c)| c.clone()).collect();

        assert_eq!(
            coeffs,
            vec![
                Rational::from(1),
                Rational::from(-1),
                Rational::from(1),
                Rational::from(-1)
            ]
        );
        assert_eq!(above.relation, Relation::Le);
        assert_eq!(
            above.tag,
            Some(RowTag {
                sample: 0,
                kind: BoundKind::Above
            })
        );
    }

    #[test]
    fn bound_rows() {
        let prec = Precision::new(20).unwrap();
        let samples = [bounded(0, 2, 3, 1), bounded(1, 2, 3, 1)];

        let lp = build(&samples, 1, Formulation::Minimax, &prec).unwrap();
        let rows = lp.program.constraints();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[2].rhs, Rational::from(6));
        assert_eq!(rows[2].relation, Relation::Le);
        assert_eq!(rows[3].rhs, Rational::from(2));
        assert_eq!(rows[3].relation, Relation::Ge);
    }

    #[test]
    fn weighted_rows() {
        let prec = Precision::new(20).unwrap();
        let samples = [bounded(0, 2, 3, 5)];

        let lp = build(&samples, 0, Formulation::WeightedDeviation, &prec)
            .unwrap();
        let rows = lp.program.constraints();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].terms[1].1, Rational::from(-5));
        assert_eq!(rows[1].terms[1].1, Rational::from(3));
    }

    #[test]
    fn interpolation_rows() {
        let prec = Precision::new(20).unwrap();
        let samples = [sample(1, 1), sample(2, 4)];

        let lp = build(&samples, 1, Formulation::Interpolation, &prec).unwrap();

        assert_eq!(lp.deviation, None);
        assert!(lp
            .program
            .constraints()
            .iter()
            .all(|row| row.relation == Relation::Eq));
        assert!(lp.program.objective().iter().all(|c| *c == 0));
    }

    #[test]
    fn contradictory_bounds() {
        let prec = Precision::new(20).unwrap();
        let samples = [bounded(0, 1, 1, 1), bounded(1, 1, 1, 2)];

        let result = build(&samples, 0, Formulation::Minimax, &prec);

        assert!(matches!(
            result,
            Err(ApproxError::InfeasibleByConstruction { index: 1, .. })
        ));
    }

    #[test]
    fn powers() {
        let prec = Precision::new(20).unwrap();

        assert_eq!(
            monomials(&Rational::from(3), 3, &prec),
            vec![
                Rational::from(1),
                Rational::from(3),
                Rational::from(9),
                Rational::from(27)
            ]
        );
    }
}
