//! Optimal polynomial approximation by linear programming.
//!
//! A target function is sampled on a finite set of points of an interval and
//! the best polynomial of a given degree is found by solving a linear program
//! with a two-phase revised simplex method. All arithmetic is carried out on
//! rationals rounded to a configurable number of significant digits, which
//! keeps the ill-conditioned Vandermonde systems of high-degree fits usable.

pub mod error;
pub mod expr;
pub mod functions;
pub mod lp;
pub mod optimizer;
pub mod opts;
pub mod precision;
pub mod report;
pub mod sampler;
pub mod simplex;
pub mod utils;

pub use error::{ApproxError, EvalError, Role};
pub use lp::Formulation;
pub use optimizer::OptimalPolynomial;
pub use precision::Precision;
pub use report::{Polynomial, Report};
pub use sampler::{Spacing, Weights};
pub use simplex::Status;
