use std::process::ExitCode;

use malachite::Rational;

use optimal_poly::expr::{self, Function};
use optimal_poly::functions::ScalarFn;
use optimal_poly::opts::Opts;
use optimal_poly::report;
use optimal_poly::utils::{Diagnostic, Reporter};
use optimal_poly::{OptimalPolynomial, Precision, Weights};

const VARIABLE: &str = "x";

fn parse_function(name: &str, src: &str) -> Option<Function> {
    match expr::parse_function(VARIABLE, src) {
        Ok(f) => Some(f),
        Err(diagnostic) => {
            Reporter::new(name, src).emit(&diagnostic);

            None
        }
    }
}

fn parse_weight(
    name: &str,
    src: &Option<String>,
) -> Result<Option<Function>, ()> {
    match src {
        Some(src) => parse_function(name, src).map(Some).ok_or(()),
        None => Ok(None),
    }
}

fn parse_endpoint(name: &str, src: &str, prec: &Precision) -> Option<Rational> {
    let value = prec.parse(src);

    if value.is_none() {
        Reporter::new(name, src).emit(
            &Diagnostic::error()
                .with_message(format!("invalid endpoint `{src}`"))
                .with_primary(0..src.len(), "expected a decimal number"),
        );
    }

    value
}

fn main() -> ExitCode {
    let opts = Opts::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level)
        .init();

    let precision = match Precision::new(opts.precision) {
        Ok(precision) => precision,
        Err(err) => {
            Reporter::new("", "").emit(&Diagnostic::from(&err));

            return ExitCode::FAILURE;
        }
    };

    let Some(f) = parse_function("<function>", &opts.function) else {
        return ExitCode::FAILURE;
    };

    let (Ok(omega_sup), Ok(omega_inf)) = (
        parse_weight("<omega-sup>", &opts.omega_sup),
        parse_weight("<omega-inf>", &opts.omega_inf),
    ) else {
        return ExitCode::FAILURE;
    };

    let (Some(a), Some(b)) = (
        parse_endpoint("<from>", &opts.from, &precision),
        parse_endpoint("<to>", &opts.to, &precision),
    ) else {
        return ExitCode::FAILURE;
    };

    let weights = Weights {
        sup: omega_sup.as_ref().map(|w| w as &dyn ScalarFn),
        inf: omega_inf.as_ref().map(|w| w as &dyn ScalarFn),
    };

    let mut optimizer = OptimalPolynomial::with_precision(precision)
        .with_spacing(opts.spacing)
        .with_formulation(opts.formulation);

    if let Some(limit) = opts.max_iterations {
        optimizer = optimizer.with_max_iterations(limit);
    }

    let result =
        optimizer.get_coefs(&f, opts.degree, &a, &b, opts.points, &weights);

    if let Some(report) = optimizer.status() {
        print!("{report}");
    }

    let coefficients = match result {
        Ok(coefficients) => coefficients,
        Err(err) => {
            Reporter::new("", "").emit(&Diagnostic::from(&err));

            return ExitCode::FAILURE;
        }
    };

    if opts.table {
        let rows = report::comparison(
            &f,
            &coefficients,
            (&a, &b),
            opts.table_points,
            optimizer.precision(),
        );

        match rows {
            Ok(rows) => {
                for row in rows {
                    println!("{row}");
                }
            }
            Err(err) => {
                Reporter::new("", "").emit(&Diagnostic::from(&err));

                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
