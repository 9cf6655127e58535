//! Method subcommands.
//!
//! Each subcommand collects its method's inputs, fills the stopping rule
//! from the persisted defaults, and hands a [`Problem`] to the solver.

use anyhow::Result;
use clap::Args;

use zof_math::problem::{MethodParams, Problem};
use zof_math::SolverConfig;

use crate::commands::Context;
use crate::output::print_solution;

/// Options shared by every method.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Equation f(x), e.g. "x**3 - x - 2"
    #[arg(short, long)]
    pub equation: String,

    /// Stopping tolerance (defaults to the `default_tolerance` setting)
    #[arg(long)]
    pub tol: Option<f64>,

    /// Iteration budget (defaults to the `default_max_iterations` setting)
    #[arg(long)]
    pub max_iter: Option<u32>,
}

/// Arguments for bisection and regula falsi.
#[derive(Args, Debug)]
pub struct BracketArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Left end of the bracket
    #[arg(short, allow_negative_numbers = true)]
    pub a: f64,

    /// Right end of the bracket
    #[arg(short, allow_negative_numbers = true)]
    pub b: f64,
}

/// Arguments for the secant method.
#[derive(Args, Debug)]
pub struct SecantArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// First starting point
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Second starting point
    #[arg(long, allow_negative_numbers = true)]
    pub x1: f64,
}

/// Arguments for Newton-Raphson.
#[derive(Args, Debug)]
pub struct NewtonArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Initial guess
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Show the derivative used for the iteration
    #[arg(long)]
    pub derivative: bool,
}

/// Arguments for fixed-point iteration.
#[derive(Args, Debug)]
pub struct FixedPointArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Initial guess
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Rearrangement g(x) with x = g(x) at the root
    #[arg(short = 'g', long = "g-expr")]
    pub g: String,
}

/// Arguments for the modified secant method.
#[derive(Args, Debug)]
pub struct ModifiedSecantArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Initial guess
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Relative perturbation (defaults to the `default_delta` setting)
    #[arg(long, allow_negative_numbers = true)]
    pub delta: Option<f64>,
}

/// Execute the bisection command.
pub fn bisection(args: BracketArgs, ctx: &Context) -> Result<()> {
    let params = MethodParams::Bisection {
        a: args.a,
        b: args.b,
    };
    run(args.common, params, false, ctx)
}

/// Execute the regula-falsi command.
pub fn regula_falsi(args: BracketArgs, ctx: &Context) -> Result<()> {
    let params = MethodParams::RegulaFalsi {
        a: args.a,
        b: args.b,
    };
    run(args.common, params, false, ctx)
}

/// Execute the secant command.
pub fn secant(args: SecantArgs, ctx: &Context) -> Result<()> {
    let params = MethodParams::Secant {
        x0: args.x0,
        x1: args.x1,
    };
    run(args.common, params, false, ctx)
}

/// Execute the newton command.
pub fn newton(args: NewtonArgs, ctx: &Context) -> Result<()> {
    let params = MethodParams::NewtonRaphson { x0: args.x0 };
    run(args.common, params, args.derivative, ctx)
}

/// Execute the fixed-point command.
pub fn fixed_point(args: FixedPointArgs, ctx: &Context) -> Result<()> {
    let params = MethodParams::FixedPoint {
        x0: args.x0,
        g: args.g,
    };
    run(args.common, params, false, ctx)
}

/// Execute the modified-secant command.
pub fn modified_secant(args: ModifiedSecantArgs, ctx: &Context) -> Result<()> {
    let params = MethodParams::ModifiedSecant {
        x0: args.x0,
        delta: args.delta.unwrap_or(ctx.settings.delta),
    };
    run(args.common, params, false, ctx)
}

fn run(common: CommonArgs, params: MethodParams, show_derivative: bool, ctx: &Context) -> Result<()> {
    let config = SolverConfig::new(
        common.tol.unwrap_or(ctx.settings.tolerance),
        common.max_iter.unwrap_or(ctx.settings.max_iterations),
    );
    let problem = Problem::new(common.equation, params, config);
    let solution = problem.solve()?;

    print_solution(&solution, ctx, show_derivative)
}
