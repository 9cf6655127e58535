//! ZOF CLI - find a zero of a single-variable function.
//!
//! # Usage
//!
//! ```bash
//! # Interactive prompt
//! zof
//!
//! # Bisection on [1, 2]
//! zof bisection -e "x**3 - x - 2" -a 1 -b 2 --tol 1e-8
//!
//! # Newton-Raphson, showing the derivative
//! zof newton -e "cos(x) - x" --x0 1 --derivative
//!
//! # Fixed-point iteration of x = cos(x), as JSON
//! zof -f json fixed-point -e "x - cos(x)" --x0 0.5 -g "cos(x)"
//!
//! # Persist a default tolerance
//! zof config set default_tolerance 1e-10
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context::from_cli(&cli)?;

    if !ctx.settings.use_colors {
        colored::control::set_override(false);
    }

    // Execute command
    match cli.command {
        None | Some(Commands::Interactive) => commands::interactive::execute(&ctx)?,
        Some(Commands::Bisection(args)) => commands::solve::bisection(args, &ctx)?,
        Some(Commands::RegulaFalsi(args)) => commands::solve::regula_falsi(args, &ctx)?,
        Some(Commands::Secant(args)) => commands::solve::secant(args, &ctx)?,
        Some(Commands::Newton(args)) => commands::solve::newton(args, &ctx)?,
        Some(Commands::FixedPoint(args)) => commands::solve::fixed_point(args, &ctx)?,
        Some(Commands::ModifiedSecant(args)) => commands::solve::modified_secant(args, &ctx)?,
        Some(Commands::Methods) => commands::methods::execute(&ctx)?,
        Some(Commands::Config(args)) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
