use std::fmt;

use malachite::Rational;
use smallvec::SmallVec;

use super::ast::{ExprKind, Expression, Span};
use crate::error::EvalError;
use crate::functions::ScalarFn;
use crate::precision::Precision;

/// An expression in one variable, usable as a target or weight function.
#[derive(Clone, Debug)]
pub struct Function {
    var: String,
    body: Expression,
}

/// A variable other than the bound one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnboundSymbol {
    pub name: String,
    pub span: Span,
}

impl fmt::Display for UnboundSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unbound variable `{}`", self.name)
    }
}

impl Function {
    pub fn new(var: &str, body: Expression) -> Result<Function, UnboundSymbol> {
        if let Some((name, span)) =
            body.variables().into_iter().find(|(name, _)| *name != var)
        {
            return Err(UnboundSymbol {
                name: name.to_string(),
                span,
            });
        }

        Ok(Function {
            var: var.to_string(),
            body,
        })
    }

    fn eval_expr(
        &self,
        expr: &Expression,
        x: &Rational,
        prec: &Precision,
    ) -> Result<Rational, EvalError> {
        match &expr.kind {
            ExprKind::Num(value) => Ok(prec.round(value.clone())),
            ExprKind::Const(constant) => Ok(constant.value(prec)),
            ExprKind::Var(name) if *name == self.var => Ok(x.clone()),
            ExprKind::Var(name) => {
                Err(EvalError::UnboundVariable(name.clone()))
            }
            ExprKind::Op(op, args) => {
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, x, prec))
                    .collect::<Result<SmallVec<[_; 2]>, _>>()?;

                op.apply(&args, prec)
            }
        }
    }
}

impl ScalarFn for Function {
    fn eval(
        &self,
        x: &Rational,
        prec: &Precision,
    ) -> Result<Rational, EvalError> {
        self.eval_expr(&self.body, x, prec)
    }
}
