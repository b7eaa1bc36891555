//! Two-phase revised simplex over precision scalars.

mod matrix;
mod solver;
mod standard;

use std::fmt;

use malachite::Rational;
use strum_macros::Display;

use crate::lp::{RowTag, Variable};

pub use matrix::{Matrix, Singular};
pub use solver::RevisedSimplex;
pub use standard::{Column, StandardForm};

/// Outcome of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    IterationLimitExceeded,
    /// The basis became singular at the working precision.
    NumericalBreakdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Phase {
    #[strum(to_string = "phase one")]
    One,
    #[strum(to_string = "phase two")]
    Two,
}

/// Where a solve stopped when it did not reach an optimum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cause {
    pub phase: Phase,
    /// Constraint row responsible, for infeasibility.
    pub row: Option<usize>,
    pub tag: Option<RowTag>,
    /// Variable that could grow without bound, or whose column broke the basis.
    pub variable: Option<Variable>,
}

impl Cause {
    pub(crate) fn in_phase(phase: Phase) -> Cause {
        Cause {
            phase,
            row: None,
            tag: None,
            variable: None,
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.phase)?;

        if let Some(row) = self.row {
            write!(f, ", row {row}")?;
        }

        if let Some(tag) = &self.tag {
            write!(f, " ({tag})")?;
        }

        if let Some(var) = self.variable {
            write!(f, ", variable {}", var.idx())?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Solution {
    pub status: Status,
    /// Value of every variable of the program, when optimal.
    pub values: Option<Vec<Rational>>,
    pub objective: Option<Rational>,
    pub iterations: usize,
    pub cause: Option<Cause>,
}

impl Solution {
    pub fn value(&self, var: Variable) -> Option<&Rational> {
        self.values.as_ref().map(|values| &values[var.idx()])
    }
}
