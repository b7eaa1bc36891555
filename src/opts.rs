use argh::FromArgs;
use log::LevelFilter;

use crate::lp::Formulation;
use crate::sampler::Spacing;

/// Best polynomial approximation by linear programming.
#[derive(FromArgs)]
pub struct Opts {
    /// function of `x` to approximate, e.g. `(- (exp x) 2)`
    #[argh(positional)]
    pub function: String,

    /// polynomial degree
    #[argh(option, short = 'd')]
    pub degree: usize,

    /// left endpoint of the interval
    #[argh(option, short = 'a', long = "from")]
    pub from: String,

    /// right endpoint of the interval
    #[argh(option, short = 'b', long = "to")]
    pub to: String,

    /// number of sample points
    #[argh(option, short = 'n', default = "50")]
    pub points: usize,

    /// significant decimal digits
    #[argh(option, short = 'p', default = "50")]
    pub precision: u32,

    /// upper weight function, bounding p(x) above by f(x) * omega_sup(x)
    #[argh(option)]
    pub omega_sup: Option<String>,

    /// lower weight function, bounding p(x) below by f(x) * omega_inf(x)
    #[argh(option)]
    pub omega_inf: Option<String>,

    /// sample point placement: uniform or chebyshev
    #[argh(option, default = "Default::default()")]
    pub spacing: Spacing,

    /// LP formulation: minimax, weighted or interpolation
    #[argh(option, default = "Default::default()")]
    pub formulation: Formulation,

    /// simplex iteration limit
    #[argh(option)]
    pub max_iterations: Option<usize>,

    /// print the function and the polynomial side by side
    #[argh(switch)]
    pub table: bool,

    /// number of rows in the comparison table
    #[argh(option, default = "100")]
    pub table_points: usize,

    /// logging level
    #[argh(option, long = "log", default = "LevelFilter::Warn")]
    pub log_level: LevelFilter,
}

impl Opts {
    /// Parse options from `env::args`.
    pub fn parse() -> Opts {
        argh::from_env()
    }
}
