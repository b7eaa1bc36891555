//! Built-in operations and constants.

use std::cmp::Ordering;

use malachite::num::arithmetic::traits::{Abs, Sign};
use malachite::Rational;
use strum_macros::{Display, EnumString};

use super::elementary;
use crate::error::EvalError;
use crate::precision::Precision;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum Builtin {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "neg")]
    Neg,
    #[strum(serialize = "pow")]
    Pow,
    #[strum(serialize = "sqrt")]
    Sqrt,
    #[strum(serialize = "fabs")]
    FAbs,
    #[strum(serialize = "exp")]
    Exp,
    #[strum(serialize = "log")]
    Log,
    #[strum(serialize = "sin")]
    Sin,
    #[strum(serialize = "cos")]
    Cos,
    #[strum(serialize = "tan")]
    Tan,
}

impl Builtin {
    /// Checks whether the operation accepts `n` arguments.
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Builtin::Add | Builtin::Mul => n >= 2,
            Builtin::Sub => n == 1 || n == 2,
            Builtin::Div | Builtin::Pow => n == 2,
            _ => n == 1,
        }
    }

    pub fn apply(
        &self,
        args: &[Rational],
        prec: &Precision,
    ) -> Result<Rational, EvalError> {
        match (self, args) {
            (Builtin::Add, [first, rest @ ..]) => {
                Ok(rest.iter().fold(first.clone(), |acc, x| prec.add(&acc, x)))
            }
            (Builtin::Mul, [first, rest @ ..]) => {
                Ok(rest.iter().fold(first.clone(), |acc, x| prec.mul(&acc, x)))
            }
            (Builtin::Sub, [x]) | (Builtin::Neg, [x]) => Ok(-x),
            (Builtin::Sub, [x, y]) => Ok(prec.sub(x, y)),
            (Builtin::Div, [x, y]) => {
                if y.sign() == Ordering::Equal {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(prec.div(x, y))
                }
            }
            (Builtin::Pow, [x, y]) => elementary::pow(x, y, prec),
            (Builtin::Sqrt, [x]) => elementary::sqrt(x, prec),
            (Builtin::FAbs, [x]) => Ok(x.abs()),
            (Builtin::Exp, [x]) => Ok(elementary::exp(x, prec)),
            (Builtin::Log, [x]) => elementary::ln(x, prec),
            (Builtin::Sin, [x]) => Ok(elementary::sin(x, prec)),
            (Builtin::Cos, [x]) => Ok(elementary::cos(x, prec)),
            (Builtin::Tan, [x]) => elementary::tan(x, prec),
            _ => Err(EvalError::Other(format!(
                "`{self}` applied to {} arguments",
                args.len()
            ))),
        }
    }
}

/// A named mathematical constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum MathConst {
    #[strum(serialize = "PI")]
    Pi,
    #[strum(serialize = "E")]
    E,
}

impl MathConst {
    pub fn value(&self, prec: &Precision) -> Rational {
        match self {
            MathConst::Pi => elementary::pi(prec),
            MathConst::E => elementary::exp(&Rational::from(1), prec),
        }
    }
}
