//! Methods command implementation.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use zof_math::problem::Method;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_header, print_output};

/// One row of the method listing.
#[derive(Debug, Serialize, Tabled)]
pub struct MethodRow {
    #[tabled(rename = "No.")]
    pub number: usize,
    #[tabled(rename = "Method")]
    pub name: &'static str,
    #[tabled(rename = "Command")]
    pub command: &'static str,
    #[tabled(rename = "Parameters")]
    pub parameters: String,
}

/// The subcommand that runs `method`.
pub fn subcommand(method: Method) -> &'static str {
    match method {
        Method::Bisection => "bisection",
        Method::RegulaFalsi => "regula-falsi",
        Method::Secant => "secant",
        Method::NewtonRaphson => "newton",
        Method::FixedPoint => "fixed-point",
        Method::ModifiedSecant => "modified-secant",
    }
}

fn rows() -> Vec<MethodRow> {
    Method::all()
        .iter()
        .enumerate()
        .map(|(i, method)| MethodRow {
            number: i + 1,
            name: method.name(),
            command: subcommand(*method),
            parameters: method.parameters().join(", "),
        })
        .collect()
}

/// Execute the methods command.
pub fn execute(ctx: &Context) -> Result<()> {
    let rows = rows();

    match ctx.format {
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{}", row.command);
            }
        }
        OutputFormat::Table if !ctx.quiet => {
            print_header("Root-Finding Methods");
            print_output(&rows, ctx.format)?;
        }
        _ => print_output(&rows, ctx.format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_menu_order() {
        let rows = rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].command, "bisection");
        assert_eq!(rows[3].name, "Newton-Raphson");
        assert_eq!(rows[4].parameters, "x0, g");
    }
}
