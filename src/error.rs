//! Error types.

use std::{error, fmt};

use malachite::num::conversion::traits::RoundingFrom;
use malachite::rounding_modes::RoundingMode;
use malachite::Rational;

use crate::report::Report;
use crate::simplex::Status;

/// A failure while evaluating a target or weight function.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    DivisionByZero,
    OutOfDomain(&'static str),
    UnboundVariable(String),
    Other(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::OutOfDomain(op) => {
                write!(f, "argument outside the domain of `{op}`")
            }
            EvalError::UnboundVariable(name) => {
                write!(f, "unbound variable `{name}`")
            }
            EvalError::Other(message) => write!(f, "{message}"),
        }
    }
}

impl error::Error for EvalError {}

/// The part a user-supplied callable plays in an approximation problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Target,
    UpperWeight,
    LowerWeight,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Role::Target => "f",
            Role::UpperWeight => "omega_sup",
            Role::LowerWeight => "omega_inf",
        };

        write!(f, "{name}")
    }
}

/// An error raised by [`OptimalPolynomial`](crate::OptimalPolynomial).
#[derive(Debug)]
#[non_exhaustive]
pub enum ApproxError {
    /// The requested precision is unusable.
    InvalidConfiguration(String),
    /// The interval is empty or reversed.
    InvalidInterval { a: Rational, b: Rational },
    /// Fewer sample points than polynomial coefficients.
    UnderdeterminedSystem { points: usize, coefficients: usize },
    /// A callable failed at a sample point.
    Evaluation {
        role: Role,
        index: usize,
        point: Rational,
        source: EvalError,
    },
    /// A sample's lower bound exceeds its upper bound.
    InfeasibleByConstruction {
        index: usize,
        point: Rational,
        lower: Rational,
        upper: Rational,
    },
    /// The solver terminated without an optimal solution.
    Solver(Box<Report>),
}

impl ApproxError {
    /// Returns the solver status when the error came from the solver.
    pub fn status(&self) -> Option<Status> {
        match self {
            ApproxError::Solver(report) => Some(report.status),
            _ => None,
        }
    }
}

impl fmt::Display for ApproxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApproxError::InvalidConfiguration(message) => {
                write!(f, "invalid configuration: {message}")
            }
            ApproxError::InvalidInterval { a, b } => {
                write!(
                    f,
                    "invalid interval: [{}, {}] is empty",
                    Decimal(a),
                    Decimal(b)
                )
            }
            ApproxError::UnderdeterminedSystem {
                points,
                coefficients,
            } => {
                write!(
                    f,
                    "underdetermined system: {points} points cannot determine \
                     {coefficients} coefficients"
                )
            }
            ApproxError::Evaluation {
                role,
                index,
                point,
                source,
            } => {
                write!(
                    f,
                    "evaluation of `{role}` failed at sample {index} \
                     (x = {}): {source}",
                    Decimal(point)
                )
            }
            ApproxError::InfeasibleByConstruction {
                index,
                point,
                lower,
                upper,
            } => {
                write!(
                    f,
                    "infeasible by construction: at sample {index} (x = {}) \
                     the lower bound {} exceeds the upper bound {}",
                    Decimal(point),
                    Decimal(lower),
                    Decimal(upper)
                )
            }
            ApproxError::Solver(report) => match &report.cause {
                Some(cause) => {
                    write!(f, "solver terminated: {} ({cause})", report.status)
                }
                None => write!(f, "solver terminated: {}", report.status),
            },
        }
    }
}

impl error::Error for ApproxError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ApproxError::Evaluation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Displays a scalar through its nearest `f64`.
struct Decimal<'a>(&'a Rational);

impl fmt::Display for Decimal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let x = f64::rounding_from(self.0, RoundingMode::Nearest).0;

        if x == 0.0 || (1e-4..1e16).contains(&x.abs()) {
            write!(f, "{x}")
        } else {
            write!(f, "{x:e}")
        }
    }
}
