//! Prefix expressions in one variable, such as `(- (exp x) 2)`.

pub mod ast;
mod function;
mod literals;
mod parser;

use pest::error::{Error, InputLocation};

pub use function::{Function, UnboundSymbol};
pub use parser::{ExprParser, Rule};

use crate::utils::Diagnostic;

/// Parses `src` as a function of `var`.
pub fn parse_function(var: &str, src: &str) -> Result<Function, Diagnostic> {
    let body =
        ExprParser::parse_expr(src).map_err(|err| parse_diagnostic(&err))?;

    Function::new(var, body).map_err(|err| {
        Diagnostic::error()
            .with_message(err.to_string())
            .with_primary(err.span, "not bound")
            .with_note(format!("expressions may only refer to `{var}`"))
    })
}

fn parse_diagnostic(err: &Error<Rule>) -> Diagnostic {
    let span = match err.location {
        InputLocation::Pos(pos) => pos..pos,
        InputLocation::Span((start, end)) => start..end,
    };

    Diagnostic::error()
        .with_message("malformed expression")
        .with_primary(span, err.variant.message())
}
