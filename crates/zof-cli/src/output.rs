//! Output formatting utilities.

use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use zof_math::problem::Solution;
use zof_math::solvers::Termination;

use crate::cli::OutputFormat;
use crate::commands::Context;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Formats a number for tables: fixed point for ordinary magnitudes,
/// scientific for very small or very large ones.
pub fn format_number(value: f64, precision: usize) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-3..1e6).contains(&magnitude) {
        format!("{:.prec$e}", value, prec = precision)
    } else {
        format!("{:.prec$}", value, prec = precision)
    }
}

/// Formats an optional value, `-` when absent.
pub fn format_optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_number(v, precision))
}

/// Renders the convergence trace with the method's column labels.
pub fn trace_table(solution: &Solution, precision: usize) -> String {
    if solution.result.trace.is_empty() {
        return "No iterations completed.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(solution.method.trace_columns().iter().copied());

    for record in &solution.result.trace {
        let mut row = vec![record.iteration.to_string()];
        row.extend(
            record
                .values()
                .into_iter()
                .map(|v| format_optional(v, precision)),
        );
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()));
    table.to_string()
}

/// Summary rows shown under the trace.
pub fn summary_rows(solution: &Solution, precision: usize, show_derivative: bool) -> Vec<KeyValue> {
    let result = &solution.result;
    let mut rows = vec![
        KeyValue::new("Method", solution.method.name()),
        KeyValue::new("Root", format!("{:.prec$}", result.root, prec = precision)),
        KeyValue::new("Estimated Error", format_optional(result.error, precision)),
        KeyValue::new("Iterations", result.iterations.to_string()),
        KeyValue::new("Status", result.termination.as_str()),
    ];
    if show_derivative {
        if let Some(derivative) = &solution.derivative {
            rows.push(KeyValue::new("f'(x)", derivative.clone()));
        }
    }
    rows
}

/// Prints a solved problem in the selected format.
pub fn print_solution(solution: &Solution, ctx: &Context, show_derivative: bool) -> anyhow::Result<()> {
    let precision = ctx.settings.precision;

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!("{} Iterations", solution.method.name()));
                println!("{}", trace_table(solution, precision));
            }
            print_output(&summary_rows(solution, precision, show_derivative), ctx.format)?;
            if !ctx.quiet {
                print_status(solution);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(solution)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            wtr.write_record(solution.method.trace_columns())?;
            for record in &solution.result.trace {
                let mut row = vec![record.iteration.to_string()];
                row.extend(
                    record
                        .values()
                        .into_iter()
                        .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
                );
                wtr.write_record(&row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            println!("{}", solution.result.root);
        }
    }

    Ok(())
}

fn print_status(solution: &Solution) {
    let result = &solution.result;
    match result.termination {
        Termination::Converged => print_success(&format!(
            "Converged after {} iterations",
            result.iterations
        )),
        Termination::Exhausted => print_warning(&format!(
            "No convergence within {} iterations; showing the last candidate",
            result.iterations
        )),
        Termination::Degenerate => print_warning(&format!(
            "Zero denominator at iteration {}; showing the last candidate",
            result.iterations
        )),
    }
}

/// Writes the plain-text report used by the interactive prompt.
pub fn write_report<W: Write>(out: &mut W, solution: &Solution, precision: usize) -> io::Result<()> {
    let result = &solution.result;

    writeln!(out)?;
    writeln!(out, "=== Iterations ===")?;
    writeln!(out, "{}", trace_table(solution, precision))?;
    if let Some(derivative) = &solution.derivative {
        writeln!(out, "f'(x) = {}", derivative)?;
    }
    writeln!(out)?;
    writeln!(out, "Root: {}", result.root)?;
    match result.error {
        Some(error) => writeln!(out, "Estimated Error: {}", error)?,
        None => writeln!(out, "Estimated Error: n/a")?,
    }
    writeln!(out, "Iterations: {}", result.iterations)?;
    writeln!(out, "Status: {}", result.termination)?;
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

#[cfg(test)]
mod tests {
    use super::*;
    use zof_math::problem::{MethodParams, Problem};
    use zof_math::SolverConfig;

    fn solved(params: MethodParams) -> Solution {
        Problem::new("x**3 - x - 2", params, SolverConfig::new(1e-6, 50))
            .solve()
            .unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.5, 3), "1.500");
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_number(1.25e-7, 2), "1.25e-7");
        assert_eq!(format_optional(None, 4), "-");
    }

    #[test]
    fn test_trace_table_headers() {
        let table = trace_table(&solved(MethodParams::Bisection { a: 1.0, b: 2.0 }), 6);
        assert!(table.contains("f(mid)"));
        assert!(table.contains("1.500000"));

        let table = trace_table(&solved(MethodParams::NewtonRaphson { x0: 1.5 }), 6);
        assert!(table.contains("f(x1)"));
    }

    #[test]
    fn test_report_text() {
        let solution = solved(MethodParams::Secant { x0: 1.0, x1: 2.0 });
        let mut out = Vec::new();
        write_report(&mut out, &solution, 6).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("=== Iterations ==="));
        assert!(text.contains("Root: 1.52137"));
        assert!(text.contains("Status: converged"));
    }

    #[test]
    fn test_summary_shows_derivative_on_request() {
        let solution = solved(MethodParams::NewtonRaphson { x0: 1.5 });

        let rows = summary_rows(&solution, 6, true);
        assert!(rows.iter().any(|r| r.key == "f'(x)" && r.value == "3*x**2 - 1"));

        let rows = summary_rows(&solution, 6, false);
        assert!(rows.iter().all(|r| r.key != "f'(x)"));
    }
}
