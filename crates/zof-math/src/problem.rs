//! Method selection and problem dispatch.
//!
//! A [`Problem`] bundles the equation text, the chosen method with its own
//! inputs, and the stopping rule. Both the command line and the web server
//! build one and call [`Problem::solve`], so they always agree.
//!
//! # Example
//!
//! ```rust
//! use zof_math::problem::{MethodParams, Problem};
//! use zof_math::SolverConfig;
//!
//! let problem = Problem::new(
//!     "x**3 - x - 2",
//!     MethodParams::NewtonRaphson { x0: 1.5 },
//!     SolverConfig::new(1e-10, 50),
//! );
//! let solution = problem.solve().unwrap();
//!
//! assert!(solution.result.converged());
//! assert_eq!(solution.derivative.as_deref(), Some("3*x**2 - 1"));
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::expression::Expression;
use crate::solvers::{
    bisection, fixed_point, modified_secant, newton_raphson, regula_falsi, secant, SolveResult,
    SolverConfig,
};

/// Default relative perturbation for the modified secant method.
pub const DEFAULT_DELTA: f64 = 0.01;

/// The six root-finding methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Interval halving.
    Bisection,
    /// False position.
    RegulaFalsi,
    /// Two-point secant.
    Secant,
    /// Newton-Raphson with a symbolic derivative.
    NewtonRaphson,
    /// Fixed-point iteration on a rearrangement `x = g(x)`.
    FixedPoint,
    /// Secant with a relative forward-difference derivative.
    ModifiedSecant,
}

impl Method {
    /// Returns every method in menu order.
    pub fn all() -> &'static [Method] {
        &[
            Self::Bisection,
            Self::RegulaFalsi,
            Self::Secant,
            Self::NewtonRaphson,
            Self::FixedPoint,
            Self::ModifiedSecant,
        ]
    }

    /// Returns the method at a 1-based menu position.
    pub fn from_menu_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::all().get(i))
            .copied()
    }

    /// Returns the human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bisection => "Bisection",
            Self::RegulaFalsi => "Regula Falsi",
            Self::Secant => "Secant",
            Self::NewtonRaphson => "Newton-Raphson",
            Self::FixedPoint => "Fixed Point",
            Self::ModifiedSecant => "Modified Secant",
        }
    }

    /// Returns the identifier used in JSON and form fields.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Bisection => "bisection",
            Self::RegulaFalsi => "regula_falsi",
            Self::Secant => "secant",
            Self::NewtonRaphson => "newton_raphson",
            Self::FixedPoint => "fixed_point",
            Self::ModifiedSecant => "modified_secant",
        }
    }

    /// Returns the names of the method's own inputs.
    pub fn parameters(&self) -> &'static [&'static str] {
        match self {
            Self::Bisection | Self::RegulaFalsi => &["a", "b"],
            Self::Secant => &["x0", "x1"],
            Self::NewtonRaphson => &["x0"],
            Self::FixedPoint => &["x0", "g"],
            Self::ModifiedSecant => &["x0", "delta"],
        }
    }

    /// Returns trace column labels, starting with the iteration index.
    ///
    /// After the first column they line up with
    /// [`IterationRecord::values`](crate::solvers::IterationRecord::values).
    pub fn trace_columns(&self) -> &'static [&'static str] {
        match self {
            Self::Bisection => &["iter", "a", "b", "mid", "f(mid)", "error"],
            Self::RegulaFalsi => &["iter", "a", "b", "root", "f(root)", "error"],
            Self::Secant => &["iter", "x0", "x1", "x2", "f(x2)", "error"],
            Self::NewtonRaphson | Self::ModifiedSecant => &["iter", "x0", "x1", "f(x1)", "error"],
            Self::FixedPoint => &["iter", "x0", "x1", "error"],
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = MathError;

    /// Accepts the slug, its kebab-case form, `newton`, or a menu number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");

        if let Ok(index) = key.parse::<usize>() {
            return Self::from_menu_index(index).ok_or_else(|| MathError::unknown_method(s));
        }

        match key.as_str() {
            "newton" => Ok(Self::NewtonRaphson),
            _ => Self::all()
                .iter()
                .find(|m| m.slug() == key)
                .copied()
                .ok_or_else(|| MathError::unknown_method(s)),
        }
    }
}

fn default_delta() -> f64 {
    DEFAULT_DELTA
}

/// A method together with its own inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MethodParams {
    /// Bisection on `[a, b]`.
    Bisection {
        /// Left end of the bracket.
        a: f64,
        /// Right end of the bracket.
        b: f64,
    },
    /// Regula falsi on `[a, b]`.
    RegulaFalsi {
        /// Left end of the bracket.
        a: f64,
        /// Right end of the bracket.
        b: f64,
    },
    /// Secant from two seeds.
    Secant {
        /// First seed.
        x0: f64,
        /// Second seed.
        x1: f64,
    },
    /// Newton-Raphson from one seed.
    NewtonRaphson {
        /// Initial guess.
        x0: f64,
    },
    /// Fixed-point iteration of `g`.
    FixedPoint {
        /// Initial guess.
        x0: f64,
        /// The rearrangement `g(x)`, as expression text.
        g: String,
    },
    /// Modified secant with relative step `delta`.
    ModifiedSecant {
        /// Initial guess.
        x0: f64,
        /// Relative perturbation.
        #[serde(default = "default_delta")]
        delta: f64,
    },
}

impl MethodParams {
    /// Returns the method these parameters belong to.
    pub fn method(&self) -> Method {
        match self {
            Self::Bisection { .. } => Method::Bisection,
            Self::RegulaFalsi { .. } => Method::RegulaFalsi,
            Self::Secant { .. } => Method::Secant,
            Self::NewtonRaphson { .. } => Method::NewtonRaphson,
            Self::FixedPoint { .. } => Method::FixedPoint,
            Self::ModifiedSecant { .. } => Method::ModifiedSecant,
        }
    }

    fn numbers(&self) -> Vec<(&'static str, f64)> {
        match self {
            Self::Bisection { a, b } | Self::RegulaFalsi { a, b } => vec![("a", *a), ("b", *b)],
            Self::Secant { x0, x1 } => vec![("x0", *x0), ("x1", *x1)],
            Self::NewtonRaphson { x0 } | Self::FixedPoint { x0, .. } => vec![("x0", *x0)],
            Self::ModifiedSecant { x0, delta } => vec![("x0", *x0), ("delta", *delta)],
        }
    }
}

/// A complete root-finding request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// The equation `f(x)` as expression text.
    pub equation: String,
    /// Method and its inputs.
    #[serde(flatten)]
    pub params: MethodParams,
    /// Stopping rule.
    #[serde(flatten)]
    pub config: SolverConfig,
}

/// The outcome of [`Problem::solve`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// The method that ran.
    pub method: Method,
    /// Root, error estimate, iteration count and trace.
    #[serde(flatten)]
    pub result: SolveResult,
    /// `f'(x)` as used by Newton-Raphson.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivative: Option<String>,
}

impl Problem {
    /// Creates a problem.
    pub fn new(equation: impl Into<String>, params: MethodParams, config: SolverConfig) -> Self {
        Self {
            equation: equation.into(),
            params,
            config,
        }
    }

    /// Returns the selected method.
    pub fn method(&self) -> Method {
        self.params.method()
    }

    /// Checks the numeric inputs before any parsing.
    pub fn validate(&self) -> MathResult<()> {
        if self.config.max_iterations == 0 {
            return Err(MathError::invalid_input("max_iterations must be at least 1"));
        }
        if !(self.config.tolerance.is_finite() && self.config.tolerance >= 0.0) {
            return Err(MathError::invalid_input(
                "tolerance must be a finite, non-negative number",
            ));
        }
        for (name, value) in self.params.numbers() {
            if !value.is_finite() {
                return Err(MathError::invalid_input(format!(
                    "{} must be a finite number",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Parses the equation and runs the selected solver.
    ///
    /// Newton-Raphson differentiates the equation symbolically and returns
    /// the derivative text alongside the result. Fixed-point iteration
    /// parses `g` and iterates it; the equation is still parsed so a
    /// malformed one is reported.
    pub fn solve(&self) -> MathResult<Solution> {
        self.validate()?;

        let f = Expression::parse(&self.equation)?;
        let config = &self.config;
        let mut derivative = None;

        debug!(
            "solving {} with {} (tol = {}, max_iter = {})",
            f,
            self.method().slug(),
            config.tolerance,
            config.max_iterations
        );

        let result = match &self.params {
            MethodParams::Bisection { a, b } => bisection(&f, *a, *b, config)?,
            MethodParams::RegulaFalsi { a, b } => regula_falsi(&f, *a, *b, config)?,
            MethodParams::Secant { x0, x1 } => secant(&f, *x0, *x1, config)?,
            MethodParams::NewtonRaphson { x0 } => {
                let df = f.derivative();
                derivative = Some(df.to_string());
                newton_raphson(&f, &df, *x0, config)?
            }
            MethodParams::FixedPoint { x0, g } => {
                let g = Expression::parse(g)?;
                fixed_point(&g, *x0, config)?
            }
            MethodParams::ModifiedSecant { x0, delta } => {
                modified_secant(&f, *x0, *delta, config)?
            }
        };

        Ok(Solution {
            method: self.method(),
            result,
            derivative,
        })
    }
}
