//! Parser for prefix expressions.

use pest::error::{Error, ErrorVariant};
use pest_consume::{match_nodes, Parser};

use super::{ast, literals};
use crate::functions::builtins::{Builtin, MathConst};

#[derive(Parser)]
#[grammar = "expr/syntax.pest"]
pub struct ExprParser;

impl ExprParser {
    pub fn parse_expr(src: &str) -> Result<ast::Expression, Box<Error<Rule>>> {
        let nodes = ExprParser::parse(Rule::file, src)?;

        ExprParser::file(nodes.single()?).map_err(Box::new)
    }
}

type ParseResult<T> = Result<T, Error<Rule>>;
type Node<'i> = pest_consume::Node<'i, Rule, ()>;

#[pest_consume::parser]
impl ExprParser {
    fn EOI(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn file(input: Node) -> ParseResult<ast::Expression> {
        Ok(match_nodes!(input.into_children();
            [expr(expr), EOI(_)] => expr,
        ))
    }

    fn expr(input: Node) -> ParseResult<ast::Expression> {
        let span = ast::Span::from(input.as_span());

        let kind = match_nodes!(input.into_children();
            [number(num)] => ast::ExprKind::Num(num),
            [constant(constant)] => ast::ExprKind::Const(constant),
            [symbol(sym)] => ast::ExprKind::Var(sym),
            [operation(op)] => op,
        );

        Ok(ast::Expression { kind, span })
    }

    fn operation(input: Node) -> ParseResult<ast::ExprKind> {
        let span = input.as_span();

        let (op, args) = match_nodes!(input.into_children();
            [operator(op), expr(args)..] => (op, args.collect::<Vec<_>>()),
        );

        if !op.accepts(args.len()) {
            return Err(custom_error(
                span,
                format!("`{op}` does not take {} arguments", args.len()),
            ));
        }

        Ok(ast::ExprKind::Op(op, args))
    }

    fn operator(input: Node) -> ParseResult<Builtin> {
        input.as_str().parse().map_err(|_| {
            custom_error(
                input.as_span(),
                format!("unknown operator `{}`", input.as_str()),
            )
        })
    }

    fn number(input: Node) -> ParseResult<malachite::Rational> {
        Ok(match_nodes!(input.into_children();
            [rational(value)] => value,
            [decnum(value)] => value,
        ))
    }

    fn pm_opt(input: Node) -> ParseResult<bool> {
        Ok(input.as_str() != "-")
    }

    fn dot(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn dec_digits(input: Node) -> ParseResult<&str> {
        Ok(input.as_str())
    }

    fn nonzero(input: Node) -> ParseResult<&str> {
        Ok(input.as_str())
    }

    fn exponent(input: Node) -> ParseResult<&str> {
        Ok(input.as_str())
    }

    fn rational(input: Node) -> ParseResult<malachite::Rational> {
        let span = input.as_span();

        let value = match_nodes!(input.into_children();
            [pm_opt(sign), dec_digits(numerator), nonzero(denominator)] => {
                literals::ratio(sign, numerator, denominator)
            },
        );

        value.ok_or_else(|| custom_error(span, "malformed rational"))
    }

    fn dec_mantissa(input: Node) -> ParseResult<(&str, &str)> {
        Ok(match_nodes!(input.into_children();
            [dec_digits(integer)] => (integer, "0"),
            [dec_digits(integer), dot(_)] => (integer, "0"),
            [dec_digits(integer), dot(_), dec_digits(fraction)] => {
                (integer, fraction)
            },
            [dot(_), dec_digits(fraction)] => ("0", fraction),
        ))
    }

    fn decnum(input: Node) -> ParseResult<malachite::Rational> {
        let span = input.as_span();

        let value = match_nodes!(input.into_children();
            [pm_opt(sign), dec_mantissa((integer, fraction)), exponent(e)] => {
                literals::scientific(sign, integer, fraction, e)
            },
            [pm_opt(sign), dec_mantissa((integer, fraction))] => {
                literals::fixed_point(sign, integer, fraction)
            },
        );

        value.ok_or_else(|| custom_error(span, "malformed number"))
    }

    fn constant(input: Node) -> ParseResult<MathConst> {
        input.as_str().parse().map_err(|_| {
            custom_error(
                input.as_span(),
                format!("unknown constant `{}`", input.as_str()),
            )
        })
    }

    fn symbol(input: Node) -> ParseResult<String> {
        Ok(input.as_str().to_string())
    }
}

fn custom_error<M: Into<String>>(span: pest::Span, message: M) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: message.into(),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use malachite::Rational;

    use super::*;
    use crate::expr::ast::ExprKind;

    fn parse(src: &str) -> ast::Expression {
        ExprParser::parse_expr(src).unwrap()
    }

    #[test]
    fn literals() {
        let num =
            |n: i64, d: i64| ExprKind::Num(Rational::from_signeds(n, d));

        assert_eq!(parse("-1.5").kind, num(-3, 2));
        assert_eq!(parse("3/4").kind, num(3, 4));
        assert_eq!(parse("2e3").kind, ExprKind::Num(Rational::from(2000)));
        assert_eq!(parse(".25").kind, num(1, 4));
        assert_eq!(parse("PI").kind, ExprKind::Const(MathConst::Pi));
        assert_eq!(parse("x").kind, ExprKind::Var(String::from("x")));
    }

    #[test]
    fn operations() {
        let expr = parse("(- (exp x) 2) ; shifted exponential");

        let ExprKind::Op(op, args) = &expr.kind else {
            panic!("expected an operation");
        };

        assert_eq!(*op, Builtin::Sub);
        assert_eq!(args.len(), 2);
        assert!(matches!(args[0].kind, ExprKind::Op(Builtin::Exp, _)));
        assert_eq!(expr.span, ast::Span { start: 0, end: 13 });
        assert_eq!(args[1].span, ast::Span { start: 11, end: 12 });
    }

    #[test]
    fn errors() {
        assert!(ExprParser::parse_expr("(hypot x x)").is_err());
        assert!(ExprParser::parse_expr("(exp x x)").is_err());
        assert!(ExprParser::parse_expr("(+ x").is_err());
        assert!(ExprParser::parse_expr("x y").is_err());
    }
}
