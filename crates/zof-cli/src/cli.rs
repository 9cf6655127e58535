//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BracketArgs, ConfigArgs, FixedPointArgs, ModifiedSecantArgs, NewtonArgs, SecantArgs,
};

/// ZOF - find a zero of a function of one variable
#[derive(Parser)]
#[command(name = "zof")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the `default_format` setting)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding config.json
    #[arg(long, env = "ZOF_CONFIG_DIR", global = true, hide_env_values = true)]
    pub config_dir: Option<PathBuf>,

    /// Runs the interactive prompt when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Prompt for the equation, method and parameters
    Interactive,

    /// Bisection on a bracket [a, b]
    Bisection(BracketArgs),

    /// Regula falsi (false position) on a bracket [a, b]
    RegulaFalsi(BracketArgs),

    /// Secant method from two starting points
    Secant(SecantArgs),

    /// Newton-Raphson with a symbolic derivative
    Newton(NewtonArgs),

    /// Fixed-point iteration of x = g(x)
    FixedPoint(FixedPointArgs),

    /// Secant with a relative forward-difference derivative
    ModifiedSecant(ModifiedSecantArgs),

    /// List the available methods and their parameters
    Methods,

    /// Manage persisted defaults
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the root)
    Minimal,
}

impl OutputFormat {
    /// Parses a stored setting value.
    pub fn from_setting(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value, true).ok()
    }
}
