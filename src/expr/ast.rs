use std::ops::Range;

use malachite::Rational;

use crate::functions::builtins::{Builtin, MathConst};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span) -> Self {
        Span {
            start: span.start(),
            end: span.end(),
        }
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Num(Rational),
    Const(MathConst),
    Var(String),
    Op(Builtin, Vec<Expression>),
}

impl Expression {
    /// Variables referenced by the expression, in source order.
    pub fn variables(&self) -> Vec<(&str, Span)> {
        let mut found = Vec::new();
        self.collect_variables(&mut found);
        found
    }

    fn collect_variables<'a>(&'a self, found: &mut Vec<(&'a str, Span)>) {
        match &self.kind {
            ExprKind::Var(name) => found.push((name.as_str(), self.span)),
            ExprKind::Op(_, args) => {
                for arg in args {
                    arg.collect_variables(found);
                }
            }
            ExprKind::Num(_) | ExprKind::Const(_) => {}
        }
    }
}
