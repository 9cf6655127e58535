//! CLI error types.

use thiserror::Error;
use zof_math::MathError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A prompt or flag value is not a number.
    #[error("Invalid value for {field}: '{value}' is not a number")]
    InvalidNumber {
        /// Which input was being read.
        field: String,
        /// The text supplied.
        value: String,
    },

    /// Input ended before all prompts were answered.
    #[error("Unexpected end of input while reading {0}")]
    EndOfInput(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse, domain or validation error from the solver.
    #[error(transparent)]
    Math(#[from] MathError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
