//! Scalar functions of one variable.

pub mod builtins;
pub mod elementary;

use malachite::Rational;

use crate::error::EvalError;
use crate::precision::Precision;

pub use builtins::Builtin;

/// A function from one precision scalar to another.
///
/// Implementations must be free of side effects observable by the solver; an
/// evaluation either produces a value or fails with an [`EvalError`].
pub trait ScalarFn {
    fn eval(
        &self,
        x: &Rational,
        prec: &Precision,
    ) -> Result<Rational, EvalError>;
}

impl<F> ScalarFn for F
where
    F: Fn(&Rational, &Precision) -> Result<Rational, EvalError>,
{
    fn eval(
        &self,
        x: &Rational,
        prec: &Precision,
    ) -> Result<Rational, EvalError> {
        self(x, prec)
    }
}

/// Fixes the signature of a closure so that it can be used as a
/// [`ScalarFn`].
pub fn scalar_fn<F>(f: F) -> F
where
    F: Fn(&Rational, &Precision) -> Result<Rational, EvalError>,
{
    f
}

/// A constant function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constant(pub Rational);

impl ScalarFn for Constant {
    fn eval(
        &self,
        _: &Rational,
        prec: &Precision,
    ) -> Result<Rational, EvalError> {
        Ok(prec.round(self.0.clone()))
    }
}
