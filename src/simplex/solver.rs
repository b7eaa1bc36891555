//! The revised simplex method with an explicit basis inverse.
//!
//! Each iteration prices the nonbasic columns against the simplex multipliers
//! `y = c_B B^-1`, picks an entering column, runs the ratio test on
//! `u = B^-1 a_q`, and updates `B^-1` in product form. The inverse is rebuilt
//! from scratch every [`REFACTOR_INTERVAL`] pivots and whenever a phase ends,
//! which bounds the rounding error accumulated by the updates.

use std::cmp;

use malachite::num::basic::traits::{One, Zero};
use malachite::Rational;

use super::matrix::Matrix;
use super::standard::{Column, StandardForm};
use super::{Cause, Phase, Solution, Status};
use crate::lp::LinearProgram;
use crate::precision::Precision;

/// Pivots between two refactorizations of the basis inverse.
const REFACTOR_INTERVAL: usize = 50;

/// Consecutive degenerate pivots after which Bland's rule takes over.
const DEGENERATE_RUN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pricing {
    /// Most negative reduced cost.
    Dantzig,
    /// Smallest eligible index, which cannot cycle.
    Bland,
}

/// Early termination of a solve.
struct Stop {
    status: Status,
    cause: Cause,
}

pub struct RevisedSimplex<'a> {
    lp: &'a LinearProgram,
    prec: &'a Precision,
    max_iterations: Option<usize>,
}

impl<'a> RevisedSimplex<'a> {
    pub fn new(
        lp: &'a LinearProgram,
        prec: &'a Precision,
    ) -> RevisedSimplex<'a> {
        RevisedSimplex {
            lp,
            prec,
            max_iterations: None,
        }
    }

    /// Caps the number of pivots over both phases.
    ///
    /// The default is `max(200, 4 * (rows + columns))` of the standard form.
    pub fn with_max_iterations(mut self, limit: usize) -> RevisedSimplex<'a> {
        self.max_iterations = Some(limit);
        self
    }

    pub fn solve(&self) -> Solution {
        let form = StandardForm::new(self.lp);

        let limit = self.max_iterations.unwrap_or_else(|| {
            cmp::max(200, 4 * (form.num_rows() + form.num_cols()))
        });

        log::debug!(
            "standard form: {} rows, {} columns, iteration limit {}",
            form.num_rows(),
            form.num_cols(),
            limit
        );

        let mut basis = Basis::new(&form, self.prec, limit);

        match basis.optimize() {
            Ok(values) => {
                let values: Vec<_> = form
                    .recover(&values, self.lp.num_vars())
                    .into_iter()
                    .map(|value| self.prec.round(value))
                    .collect();

                let objective = self.prec.dot(self.lp.objective(), &values);

                log::debug!(
                    "optimal after {} iterations, objective {}",
                    basis.iterations,
                    self.prec.to_decimal(&objective)
                );

                Solution {
                    status: Status::Optimal,
                    values: Some(values),
                    objective: Some(objective),
                    iterations: basis.iterations,
                    cause: None,
                }
            }
            Err(Stop { status, cause }) => {
                log::debug!(
                    "stopped after {} iterations: {} ({})",
                    basis.iterations,
                    status,
                    cause
                );

                Solution {
                    status,
                    values: None,
                    objective: None,
                    iterations: basis.iterations,
                    cause: Some(cause),
                }
            }
        }
    }
}

/// Mutable state of one solve.
struct Basis<'f> {
    form: &'f StandardForm,
    prec: &'f Precision,
    /// Basic column of each row.
    vars: Vec<usize>,
    is_basic: Vec<bool>,
    inverse: Matrix,
    /// Values of the basic columns.
    values: Vec<Rational>,
    pricing: Pricing,
    degenerate_run: usize,
    pivots_since_refactor: usize,
    iterations: usize,
    limit: usize,
}

impl<'f> Basis<'f> {
    fn new(
        form: &'f StandardForm,
        prec: &'f Precision,
        limit: usize,
    ) -> Basis<'f> {
        let mut is_basic = vec![false; form.num_cols()];

        for &j in &form.basis {
            is_basic[j] = true;
        }

        // The initial basic columns are unit vectors.
        Basis {
            form,
            prec,
            vars: form.basis.clone(),
            is_basic,
            inverse: Matrix::identity(form.num_rows()),
            values: form.rhs.clone(),
            pricing: Pricing::Dantzig,
            degenerate_run: 0,
            pivots_since_refactor: 0,
            iterations: 0,
            limit,
        }
    }

    /// Runs both phases and returns the value of every standard-form column.
    fn optimize(&mut self) -> Result<Vec<Rational>, Stop> {
        let form = self.form;

        if form.has_artificials() {
            let cost: Vec<_> = form
                .kinds
                .iter()
                .map(|kind| {
                    if kind.is_artificial() {
                        Rational::ONE
                    } else {
                        Rational::ZERO
                    }
                })
                .collect();

            self.run(&cost, Phase::One)?;
            self.refactor(Phase::One)?;
            self.check_feasible()?;

            if self.drive_out_artificials() {
                self.refactor(Phase::One)?;
            }
        }

        self.run(&form.cost, Phase::Two)?;
        self.refactor(Phase::Two)?;

        let mut values = vec![Rational::ZERO; form.num_cols()];

        for (&j, value) in self.vars.iter().zip(&self.values) {
            values[j] = value.clone();
        }

        Ok(values)
    }

    fn run(&mut self, cost: &[Rational], phase: Phase) -> Result<(), Stop> {
        log::debug!("{phase}: starting at iteration {}", self.iterations);

        loop {
            let cost_b: Vec<_> =
                self.vars.iter().map(|&j| cost[j].clone()).collect();
            let y = self.inverse.vec_mul(&cost_b, self.prec);

            let Some(q) = self.choose_entering(cost, &y, phase) else {
                log::debug!(
                    "{phase}: optimal at iteration {}",
                    self.iterations
                );
                return Ok(());
            };

            if self.iterations >= self.limit {
                return Err(Stop {
                    status: Status::IterationLimitExceeded,
                    cause: Cause::in_phase(phase),
                });
            }

            let u = self.inverse.mul_vec(&self.form.columns[q], self.prec);

            let Some(r) = self.choose_leaving(&u) else {
                // The phase one objective is bounded below by zero, so an
                // unbounded ray there can only come from rounding.
                let status = match phase {
                    Phase::One => Status::NumericalBreakdown,
                    Phase::Two => Status::Unbounded,
                };

                return Err(Stop {
                    status,
                    cause: Cause {
                        variable: self.form.kinds[q].variable(),
                        ..Cause::in_phase(phase)
                    },
                });
            };

            let theta = self.prec.div(&self.values[r], &u[r]);

            log::trace!(
                "{phase}: iteration {}, column {q} enters, \
                 column {} leaves row {r}",
                self.iterations,
                self.vars[r]
            );

            self.track_degeneracy(&theta);
            self.pivot(r, q, &u, &theta);
            self.iterations += 1;

            if self.pivots_since_refactor >= REFACTOR_INTERVAL {
                self.refactor(phase)?;
            }
        }
    }

    /// Picks a nonbasic column with a negative reduced cost.
    fn choose_entering(
        &self,
        cost: &[Rational],
        y: &[Rational],
        phase: Phase,
    ) -> Option<usize> {
        let threshold = -self.prec.tolerance();
        let mut best: Option<(usize, Rational)> = None;

        for (j, column) in self.form.columns.iter().enumerate() {
            if self.is_basic[j] {
                continue;
            }

            if phase == Phase::Two && self.form.kinds[j].is_artificial() {
                continue;
            }

            let reduced = self.prec.sub(&cost[j], &self.prec.dot(y, column));

            if reduced >= threshold {
                continue;
            }

            match self.pricing {
                Pricing::Bland => return Some(j),
                Pricing::Dantzig => {
                    if best.as_ref().map_or(true, |(_, d)| reduced < *d) {
                        best = Some((j, reduced));
                    }
                }
            }
        }

        best.map(|(j, _)| j)
    }

    /// Ratio test over the rows where the entering column is positive.
    fn choose_leaving(&self, u: &[Rational]) -> Option<usize> {
        let tolerance = self.prec.tolerance();
        let mut best: Option<(usize, Rational)> = None;

        for (r, u_r) in u.iter().enumerate() {
            if u_r <= tolerance {
                continue;
            }

            let ratio = &self.values[r] / u_r;

            let better = match &best {
                None => true,
                Some((s, min)) => {
                    ratio < *min
                        || (self.pricing == Pricing::Bland
                            && ratio == *min
                            && self.vars[r] < self.vars[*s])
                }
            };

            if better {
                best = Some((r, ratio));
            }
        }

        best.map(|(r, _)| r)
    }

    fn track_degeneracy(&mut self, theta: &Rational) {
        if !self.prec.is_negligible(theta) {
            self.degenerate_run = 0;
            return;
        }

        self.degenerate_run += 1;

        if self.degenerate_run >= DEGENERATE_RUN
            && self.pricing == Pricing::Dantzig
        {
            log::debug!(
                "{} consecutive degenerate pivots, switching to Bland's rule",
                self.degenerate_run
            );

            self.pricing = Pricing::Bland;
        }
    }

    /// Replaces the basic column of row `r` by column `q`, where
    /// `u = B^-1 a_q` and `theta` is the step length.
    fn pivot(&mut self, r: usize, q: usize, u: &[Rational], theta: &Rational) {
        let prec = self.prec;

        for (i, value) in self.values.iter_mut().enumerate() {
            if i == r {
                *value = theta.clone();
            } else if u[i] != 0 {
                *value = clamp(prec.sub(value, &prec.mul(theta, &u[i])), prec);
            }
        }

        let m = self.vars.len();

        for j in 0..m {
            self.inverse[(r, j)] = prec.div(&self.inverse[(r, j)], &u[r]);
        }

        let pivot_row = self.inverse.row(r).to_vec();

        for (i, u_i) in u.iter().enumerate() {
            if i == r || *u_i == 0 {
                continue;
            }

            for (j, p) in pivot_row.iter().enumerate() {
                let entry = &mut self.inverse[(i, j)];
                *entry = prec.sub(entry, &(u_i * p));
            }
        }

        self.is_basic[self.vars[r]] = false;
        self.is_basic[q] = true;
        self.vars[r] = q;

        self.pivots_since_refactor += 1;
    }

    /// Rebuilds the inverse and the basic values from the basis columns.
    fn refactor(&mut self, phase: Phase) -> Result<(), Stop> {
        let m = self.vars.len();
        let mut basis = Matrix::zeros(m, m);

        for (k, &j) in self.vars.iter().enumerate() {
            for (i, entry) in self.form.columns[j].iter().enumerate() {
                basis[(i, k)] = entry.clone();
            }
        }

        let inverse = basis.inverse(self.prec).map_err(|singular| {
            let j = self.vars[singular.column];

            Stop {
                status: Status::NumericalBreakdown,
                cause: Cause {
                    variable: self.form.kinds[j].variable(),
                    ..Cause::in_phase(phase)
                },
            }
        })?;

        self.values = inverse
            .mul_vec(&self.form.rhs, self.prec)
            .into_iter()
            .map(|value| clamp(value, self.prec))
            .collect();

        self.inverse = inverse;
        self.pivots_since_refactor = 0;

        log::trace!("{phase}: refactored at iteration {}", self.iterations);

        Ok(())
    }

    /// Fails when phase one left an artificial variable above tolerance.
    fn check_feasible(&self) -> Result<(), Stop> {
        let artificials = || {
            self.vars
                .iter()
                .zip(&self.values)
                .filter(|&(&j, _)| self.form.kinds[j].is_artificial())
        };

        let infeasibility = artificials()
            .fold(Rational::ZERO, |acc, (_, value)| acc + value);

        if self.prec.is_negligible(&infeasibility) {
            return Ok(());
        }

        let mut worst: Option<(usize, &Rational)> = None;

        for (&j, value) in artificials() {
            if worst.map_or(true, |(_, max)| value > max) {
                worst = Some((j, value));
            }
        }

        let row = worst.and_then(|(j, _)| match self.form.kinds[j] {
            Column::Artificial(row) => Some(row),
            _ => None,
        });

        Err(Stop {
            status: Status::Infeasible,
            cause: Cause {
                row,
                tag: row.and_then(|row| self.form.tags[row]),
                ..Cause::in_phase(Phase::One)
            },
        })
    }

    /// Pivots zero-valued artificials out of the basis. Rows where no other
    /// column has a usable entry are redundant and keep their artificial.
    ///
    /// Returns whether any pivot happened. These pivots are not counted as
    /// iterations.
    fn drive_out_artificials(&mut self) -> bool {
        let mut pivoted = false;

        for r in 0..self.vars.len() {
            if !self.form.kinds[self.vars[r]].is_artificial() {
                continue;
            }

            let row = self.inverse.row(r).to_vec();

            let replacement = (0..self.form.num_cols()).find(|&j| {
                let entry = self.prec.dot(&row, &self.form.columns[j]);

                !self.is_basic[j]
                    && !self.form.kinds[j].is_artificial()
                    && !self.prec.is_negligible(&entry)
            });

            match replacement {
                Some(q) => {
                    let column = &self.form.columns[q];
                    let u = self.inverse.mul_vec(column, self.prec);

                    log::trace!(
                        "driving artificial column {} out of row {r}",
                        self.vars[r]
                    );

                    self.pivot(r, q, &u, &Rational::ZERO);
                    pivoted = true;
                }
                None => log::trace!("row {r} is redundant"),
            }
        }

        pivoted
    }
}

/// Zeroes values that are negative only by rounding.
fn clamp(value: Rational, prec: &Precision) -> Rational {
    if value < 0 && prec.is_negligible(&value) {
        Rational::ZERO
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lp::{BoundKind, Domain, Relation, RowTag, Variable};

    fn int(x: i64) -> Rational {
        Rational::from(x)
    }

    /// `min -3x1 + 2x2 - x3` s.t. `2x1 - x2 + x3 <= 10`, `-x1 - 2x2 + x3 <= 4`
    fn textbook(domain: Domain) -> (LinearProgram, Vec<Variable>) {
        let mut lp = LinearProgram::new();

        let vars = vec![
            lp.add_var(int(-3), domain),
            lp.add_var(int(2), domain),
            lp.add_var(int(-1), domain),
        ];

        lp.add_constraint(
            vars.iter().copied().zip([int(2), int(-1), int(1)]),
            Relation::Le,
            int(10),
            None,
        );
        lp.add_constraint(
            vars.iter().copied().zip([int(-1), int(-2), int(1)]),
            Relation::Le,
            int(4),
            None,
        );

        (lp, vars)
    }

    #[test]
    fn textbook_nonnegative() {
        let prec = Precision::new(30).unwrap();
        let (lp, vars) = textbook(Domain::NonNegative);

        let solution = lp.solve(&prec);

        assert_eq!(solution.status, Status::Optimal);
        assert_eq!(solution.objective, Some(int(-15)));
        assert_eq!(solution.value(vars[0]), Some(&int(5)));
        assert_eq!(solution.value(vars[1]), Some(&int(0)));
        assert_eq!(solution.value(vars[2]), Some(&int(0)));
        assert_eq!(solution.iterations, 1);
    }

    #[test]
    fn textbook_free_is_unbounded() {
        let prec = Precision::new(30).unwrap();
        let (lp, _) = textbook(Domain::Free);

        let solution = lp.solve(&prec);

        assert_eq!(solution.status, Status::Unbounded);
        assert!(solution.values.is_none());
        assert_eq!(solution.cause.map(|cause| cause.phase), Some(Phase::Two));
    }

    #[test]
    fn equality_needs_phase_one() {
        let prec = Precision::new(30).unwrap();
        let mut lp = LinearProgram::new();

        let x = lp.add_var(int(1), Domain::NonNegative);
        let y = lp.add_var(int(1), Domain::NonNegative);

        lp.add_constraint(
            [(x, int(1)), (y, int(1))],
            Relation::Ge,
            int(2),
            None,
        );
        lp.add_constraint(
            [(x, int(1)), (y, int(-1))],
            Relation::Eq,
            int(0),
            None,
        );

        let solution = lp.solve(&prec);

        assert_eq!(solution.status, Status::Optimal);
        assert_eq!(solution.objective, Some(int(2)));
        assert_eq!(solution.value(x), Some(&int(1)));
        assert_eq!(solution.value(y), Some(&int(1)));
    }

    #[test]
    fn infeasible_names_the_row() {
        let prec = Precision::new(30).unwrap();
        let mut lp = LinearProgram::new();

        let x = lp.add_var(int(1), Domain::NonNegative);
        let y = lp.add_var(int(1), Domain::NonNegative);

        let tag = RowTag {
            sample: 7,
            kind: BoundKind::Lower,
        };

        lp.add_constraint(
            [(x, int(1)), (y, int(1))],
            Relation::Le,
            int(1),
            None,
        );
        lp.add_constraint(
            [(x, int(1)), (y, int(1))],
            Relation::Ge,
            int(2),
            Some(tag),
        );

        let solution = lp.solve(&prec);
        let cause = solution.cause.unwrap();

        assert_eq!(solution.status, Status::Infeasible);
        assert_eq!(cause.phase, Phase::One);
        assert_eq!(cause.row, Some(1));
        assert_eq!(cause.tag, Some(tag));
    }

    #[test]
    fn redundant_equalities() {
        let prec = Precision::new(30).unwrap();
        let mut lp = LinearProgram::new();

        let x = lp.add_var(int(1), Domain::Free);

        lp.add_constraint([(x, int(2))], Relation::Eq, int(3), None);
        lp.add_constraint([(x, int(4))], Relation::Eq, int(6), None);

        let solution = lp.solve(&prec);

        assert_eq!(solution.status, Status::Optimal);
        assert_eq!(solution.value(x), Some(&Rational::from_signeds(3, 2)));
    }

    #[test]
    fn iteration_limit() {
        let prec = Precision::new(30).unwrap();
        let (lp, _) = textbook(Domain::NonNegative);

        let solution = RevisedSimplex::new(&lp, &prec)
            .with_max_iterations(0)
            .solve();

        assert_eq!(solution.status, Status::IterationLimitExceeded);
        assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn degenerate_cycle_switches_to_bland() {
        let prec = Precision::new(30).unwrap();
        let mut lp = LinearProgram::new();

        let half = Rational::from_signeds(1, 2);
        let quarter = Rational::from_signeds(1, 4);

        // Beale's example, on which Dantzig pricing cycles forever.
        let x4 = lp.add_var(Rational::from_signeds(-3, 4), Domain::NonNegative);
        let x5 = lp.add_var(int(20), Domain::NonNegative);
        let x6 = lp.add_var(-&half, Domain::NonNegative);
        let x7 = lp.add_var(int(6), Domain::NonNegative);

        lp.add_constraint(
            [(x4, quarter), (x5, int(-8)), (x6, int(-1)), (x7, int(9))],
            Relation::Le,
            int(0),
            None,
        );
        lp.add_constraint(
            [(x4, half.clone()), (x5, int(-12)), (x6, -&half), (x7, int(3))],
            Relation::Le,
            int(0),
            None,
        );
        lp.add_constraint([(x6, int(1))], Relation::Le, int(1), None);

        let solution = lp.solve(&prec);

        let close = |value: Option<&Rational>, expected: Rational| {
            value.is_some_and(|value| prec.is_negligible(&(value - expected)))
        };

        assert_eq!(solution.status, Status::Optimal);
        assert!(close(
            solution.objective.as_ref(),
            Rational::from_signeds(-5, 4)
        ));
        assert!(close(solution.value(x4), int(1)));
        assert!(close(solution.value(x6), int(1)));
        assert!(solution.iterations > DEGENERATE_RUN);
    }

    #[test]
    fn empty_program() {
        let prec = Precision::new(30).unwrap();
        let lp = LinearProgram::new();

        let solution = lp.solve(&prec);

        assert_eq!(solution.status, Status::Optimal);
        assert_eq!(solution.objective, Some(int(0)));
    }
}
