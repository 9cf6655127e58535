//! Error types for expression handling and root finding.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur while parsing, evaluating or solving.
///
/// Degenerate steps and exhausted iteration budgets are not errors: they are
/// reported through [`crate::solvers::Termination`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// The expression text could not be parsed.
    #[error("Parse error at position {position}: {message}")]
    Parse {
        /// Byte offset into the source text.
        position: usize,
        /// What went wrong.
        message: String,
    },

    /// The expression has no finite real value at the given point.
    #[error("Domain error: {expression} is undefined or not real at x = {x}")]
    Domain {
        /// The expression, as displayed.
        expression: String,
        /// The point at which evaluation failed.
        x: f64,
    },

    /// The method selector was not recognised.
    #[error("Unknown method: {name}")]
    UnknownMethod {
        /// The selector as supplied by the caller.
        name: String,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a parse error.
    #[must_use]
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Creates a domain error.
    #[must_use]
    pub fn domain(expression: impl Into<String>, x: f64) -> Self {
        Self::Domain {
            expression: expression.into(),
            x,
        }
    }

    /// Creates an unknown method error.
    #[must_use]
    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod { name: name.into() }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::parse(3, "unexpected token ')'");
        assert!(err.to_string().contains("position 3"));

        let err = MathError::domain("sqrt(x)", -1.0);
        assert!(err.to_string().contains("x = -1"));

        let err = MathError::unknown_method("brent");
        assert_eq!(err.to_string(), "Unknown method: brent");
    }
}
