//! Interactive prompt.
//!
//! Asks for the equation, a method from the numbered menu, the stopping rule
//! and the method's own inputs, then prints the trace and a summary. An
//! empty answer takes the persisted default where one exists.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

use zof_math::problem::{Method, MethodParams, Problem};
use zof_math::{Expression, SolverConfig};

use crate::commands::{Context, Settings};
use crate::error::{CliError, CliResult};
use crate::output::write_report;

/// Execute the interactive prompt on stdin/stdout.
pub fn execute(ctx: &Context) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut stdin.lock(), &mut stdout.lock(), &ctx.settings)?;
    Ok(())
}

/// Runs one prompt session.
pub fn run<R: BufRead, W: Write>(input: &mut R, out: &mut W, settings: &Settings) -> CliResult<()> {
    writeln!(out, "==== ZOF Root Finder ====")?;

    let equation = read_line(
        input,
        out,
        "Enter equation f(x) (use ** for power, e.g. x**3 - x - 2): ",
        "equation",
    )?;
    Expression::parse(&equation)?;

    writeln!(out, "Choose method:")?;
    for (i, method) in Method::all().iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, method.name())?;
    }
    let choice = read_line(input, out, "Method number: ", "method number")?;
    let Some(method) = choice.parse().ok().and_then(Method::from_menu_index) else {
        writeln!(out, "Invalid choice.")?;
        return Ok(());
    };

    let tolerance = ask(input, out, "tolerance", Some(settings.tolerance))?;
    let max_iterations = ask(input, out, "max iterations", Some(settings.max_iterations))?;

    let params = match method {
        Method::Bisection => MethodParams::Bisection {
            a: ask(input, out, "a", None)?,
            b: ask(input, out, "b", None)?,
        },
        Method::RegulaFalsi => MethodParams::RegulaFalsi {
            a: ask(input, out, "a", None)?,
            b: ask(input, out, "b", None)?,
        },
        Method::Secant => MethodParams::Secant {
            x0: ask(input, out, "x0", None)?,
            x1: ask(input, out, "x1", None)?,
        },
        Method::NewtonRaphson => MethodParams::NewtonRaphson {
            x0: ask(input, out, "x0", None)?,
        },
        Method::FixedPoint => MethodParams::FixedPoint {
            x0: ask(input, out, "x0", None)?,
            g: read_line(input, out, "Enter g(x) for Fixed Point: ", "g(x)")?,
        },
        Method::ModifiedSecant => MethodParams::ModifiedSecant {
            x0: ask(input, out, "x0", None)?,
            delta: ask(
                input,
                out,
                "delta (small number, e.g., 0.01)",
                Some(settings.delta),
            )?,
        },
    };

    let problem = Problem::new(equation, params, SolverConfig::new(tolerance, max_iterations));
    let solution = problem.solve()?;

    write_report(out, &solution, settings.precision)?;
    Ok(())
}

fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    field: &str,
) -> CliResult<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::EndOfInput(field.to_string()));
    }
    Ok(line.trim().to_string())
}

fn ask<T, R, W>(input: &mut R, out: &mut W, label: &str, default: Option<T>) -> CliResult<T>
where
    T: FromStr + Display,
    R: BufRead,
    W: Write,
{
    let message = match &default {
        Some(value) => format!("Enter {} [{}]: ", label, value),
        None => format!("Enter {}: ", label),
    };
    let text = read_line(input, out, &message, label)?;

    match default {
        Some(value) if text.is_empty() => Ok(value),
        _ => text.parse().map_err(|_| CliError::InvalidNumber {
            field: label.to_string(),
            value: text,
        }),
    }
}
