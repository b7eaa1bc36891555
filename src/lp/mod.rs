//! Linear programs over precision scalars.
//!
//! A [`LinearProgram`] minimizes a linear objective subject to linear
//! constraints. Variables are either free or nonnegative; the conversion to
//! the equality form consumed by the simplex solver happens in
//! [`crate::simplex`].

pub mod builder;

use std::fmt;

use malachite::num::basic::traits::Zero;
use malachite::Rational;
use strum_macros::Display;

use crate::precision::Precision;
use crate::simplex::{RevisedSimplex, Solution};

pub use builder::{build, Formulation, LpInstance};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(pub(crate) usize);

impl Variable {
    pub fn idx(&self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Free,
    NonNegative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Relation {
    #[strum(to_string = "<=")]
    Le,
    #[strum(to_string = ">=")]
    Ge,
    #[strum(to_string = "=")]
    Eq,
}

/// What a constraint row says about the polynomial at a sample point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum BoundKind {
    /// `p(x) - t <= f(x)`
    #[strum(to_string = "deviation above the target")]
    Above,
    /// `p(x) + t >= f(x)`
    #[strum(to_string = "deviation below the target")]
    Below,
    #[strum(to_string = "upper bound")]
    Upper,
    #[strum(to_string = "lower bound")]
    Lower,
    #[strum(to_string = "interpolation")]
    Exact,
}

/// Links a constraint row back to the sample it was generated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowTag {
    pub sample: usize,
    pub kind: BoundKind,
}

impl fmt::Display for RowTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at sample {}", self.kind, self.sample)
    }
}

#[derive(Clone, Debug)]
pub struct Constraint {
    pub terms: Vec<(Variable, Rational)>,
    pub relation: Relation,
    pub rhs: Rational,
    pub tag: Option<RowTag>,
}

impl Constraint {
    /// Left-hand side evaluated at `values`, exactly.
    pub fn activity(&self, values: &[Rational]) -> Rational {
        self.terms.iter().fold(Rational::ZERO, |acc, (var, coeff)| {
            acc + coeff * &values[var.0]
        })
    }
}

/// A minimization problem.
#[derive(Clone, Debug, Default)]
pub struct LinearProgram {
    objective: Vec<Rational>,
    domains: Vec<Domain>,
    constraints: Vec<Constraint>,
}

impl LinearProgram {
    pub fn new() -> LinearProgram {
        LinearProgram::default()
    }

    /// Adds a variable with objective coefficient `cost`.
    pub fn add_var(&mut self, cost: Rational, domain: Domain) -> Variable {
        let var = Variable(self.objective.len());

        self.objective.push(cost);
        self.domains.push(domain);

        var
    }

    /// Adds the constraint `sum(coeff * var) relation rhs`.
    ///
    /// # Panics
    ///
    /// Panics if a term refers to a variable of another program.
    pub fn add_constraint<I>(
        &mut self,
        terms: I,
        relation: Relation,
        rhs: Rational,
        tag: Option<RowTag>,
    ) where
        I: IntoIterator<Item = (Variable, Rational)>,
    {
        let terms: Vec<_> = terms.into_iter().collect();

        assert!(
            terms.iter().all(|(var, _)| var.0 < self.num_vars()),
            "constraint refers to an unknown variable"
        );

        self.constraints.push(Constraint {
            terms,
            relation,
            rhs,
            tag,
        });
    }

    pub fn num_vars(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn objective(&self) -> &[Rational] {
        &self.objective
    }

    pub fn domain(&self, var: Variable) -> Domain {
        self.domains[var.0]
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Solves the program with the default iteration limit.
    pub fn solve(&self, prec: &Precision) -> Solution {
        RevisedSimplex::new(self, prec).solve()
    }
}
