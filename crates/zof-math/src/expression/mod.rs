//! Single-variable expressions.
//!
//! Expressions are written in the usual infix syntax:
//!
//! - operators `+ - * /` and `**` (or `^`) for powers
//! - functions `sin cos tan asin acos atan sinh cosh tanh exp log ln sqrt abs sign`
//! - constants `pi` and `E`
//!
//! Multiplication is always explicit: `2*x`, never `2x`.
//!
//! # Example
//!
//! ```rust
//! use zof_math::Expression;
//!
//! let f: Expression = "x**3 - x - 2".parse().unwrap();
//! assert_eq!(f.evaluate(2.0).unwrap(), 4.0);
//! assert_eq!(f.derivative().to_string(), "3*x**2 - 1");
//! ```

pub mod ast;
mod derivative;
mod parser;

pub use parser::{MAX_NESTING, MAX_TOKENS};

use std::fmt;
use std::str::FromStr;

use crate::error::{MathError, MathResult};
use crate::solvers::Objective;
use ast::Node;

/// A parsed real-valued function of one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    variable: String,
    root: Node,
}

impl Expression {
    /// Parses an expression in `x`.
    pub fn parse(src: &str) -> MathResult<Self> {
        Self::parse_in(src, "x")
    }

    /// Parses an expression in the named variable.
    pub fn parse_in(src: &str, variable: &str) -> MathResult<Self> {
        let root = parser::parse(src, variable)?;
        Ok(Self {
            variable: variable.to_string(),
            root,
        })
    }

    /// Returns the variable name.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Returns the expression tree.
    pub fn node(&self) -> &Node {
        &self.root
    }

    /// Evaluates the expression at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::Domain`] if the result is NaN or infinite, e.g.
    /// `sqrt(-1)`, `log(0)` or `1/0`.
    pub fn evaluate(&self, x: f64) -> MathResult<f64> {
        let value = self.root.eval(x);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(MathError::domain(self.to_string(), x))
        }
    }

    /// Returns the symbolic derivative with respect to the variable.
    #[must_use]
    pub fn derivative(&self) -> Self {
        Self {
            variable: self.variable.clone(),
            root: derivative::differentiate(&self.root),
        }
    }
}

impl FromStr for Expression {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_to(f, &self.variable)
    }
}

impl Objective for Expression {
    fn evaluate(&self, x: f64) -> MathResult<f64> {
        Expression::evaluate(self, x)
    }
}
