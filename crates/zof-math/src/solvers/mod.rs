//! Root-finding algorithms.
//!
//! This module provides six iterative solvers for `f(x) = 0`:
//!
//! - [`bisection`]: halves a sign-changing bracket every step
//! - [`regula_falsi`]: bracketing method using linear interpolation
//! - [`secant`]: derivative-free method from two seeds
//! - [`newton_raphson`]: quadratic convergence when `f'` is available
//! - [`fixed_point`]: iterates a caller-supplied rearrangement `x = g(x)`
//! - [`modified_secant`]: Newton with a forward-difference derivative
//!
//! # Choosing a Solver
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Bisection | Slow (linear) | Guaranteed | Bracket |
//! | Regula falsi | Linear to superlinear | Guaranteed | Bracket |
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Newton-Raphson | Fastest (quadratic) | May diverge | Derivative |
//! | Fixed point | Linear | Needs \|g'\| < 1 | Rearrangement `g` |
//! | Modified secant | Fast (superlinear) | May diverge | Perturbation `delta` |
//!
//! # Iteration Contract
//!
//! Every solver runs the same loop. Each iteration produces one candidate and
//! appends one [`IterationRecord`], then stops when, in order:
//!
//! 1. the function value at the candidate is exactly zero,
//! 2. the error estimate is defined and strictly below the tolerance,
//! 3. the iteration budget is spent.
//!
//! A solver whose update divides by a difference of function values (or by
//! the derivative) stops early when that denominator is exactly zero. No
//! record is appended for that step and the result is tagged
//! [`Termination::Degenerate`].
//!
//! # Example
//!
//! ```rust
//! use zof_math::solvers::{bisection, SolverConfig, Termination};
//!
//! let f = |x: f64| x * x * x - x - 2.0;
//! let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-6, 50)).unwrap();
//!
//! assert_eq!(result.termination, Termination::Converged);
//! assert_eq!(result.trace.len(), result.iterations as usize);
//! assert!((result.root - 1.5213797).abs() < 1e-5);
//! ```

mod bisection;
mod fixed_point;
mod modified_secant;
mod newton;
mod regula_falsi;
mod secant;

pub use bisection::bisection;
pub use fixed_point::fixed_point;
pub use modified_secant::modified_secant;
pub use newton::newton_raphson;
pub use regula_falsi::regula_falsi;
pub use secant::secant;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// A real-valued function of one real variable.
///
/// Plain closures are infallible objectives. Parsed
/// [`Expression`](crate::expression::Expression)s fail with
/// [`MathError::Domain`] where they have no finite real value, and the error
/// aborts the solve.
pub trait Objective {
    /// Evaluates the function at `x`.
    fn evaluate(&self, x: f64) -> MathResult<f64>;
}

impl<F> Objective for F
where
    F: Fn(f64) -> f64,
{
    fn evaluate(&self, x: f64) -> MathResult<f64> {
        Ok(self(x))
    }
}

/// Working values a method logs for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Step {
    /// Bracket `[a, b]` at the start of the iteration.
    Bracket {
        /// Left endpoint.
        a: f64,
        /// Right endpoint.
        b: f64,
    },
    /// The two points the secant line is drawn through.
    Secant {
        /// Older point.
        x0: f64,
        /// Newer point.
        x1: f64,
    },
    /// The single point an open method steps from.
    Open {
        /// Current iterate.
        x0: f64,
    },
}

/// One row of a convergence trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationRecord {
    /// 1-based iteration index.
    pub iteration: u32,
    /// Method-specific working values.
    #[serde(flatten)]
    pub step: Step,
    /// The candidate produced by this iteration.
    pub candidate: f64,
    /// `f(candidate)`, absent when the method never evaluates `f`.
    pub f_candidate: Option<f64>,
    /// Distance to the previous candidate, absent on the first bracketing step.
    pub error: Option<f64>,
}

impl IterationRecord {
    /// Returns the logged values in display order, without the iteration index.
    ///
    /// The order matches [`Method::trace_columns`](crate::problem::Method::trace_columns)
    /// after its leading iteration column.
    pub fn values(&self) -> Vec<Option<f64>> {
        let mut values = match self.step {
            Step::Bracket { a, b } => vec![Some(a), Some(b)],
            Step::Secant { x0, x1 } => vec![Some(x0), Some(x1)],
            Step::Open { x0 } => vec![Some(x0)],
        };
        values.push(Some(self.candidate));
        if self.f_candidate.is_some() {
            values.push(self.f_candidate);
        }
        values.push(self.error);
        values
    }
}

/// Why a solve stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Exact root found or error estimate below tolerance.
    Converged,
    /// Iteration budget spent without converging.
    Exhausted,
    /// A required denominator was exactly zero.
    Degenerate,
}

impl Termination {
    /// Returns a lowercase label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Converged => "converged",
            Self::Exhausted => "exhausted",
            Self::Degenerate => "degenerate",
        }
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a root-finding run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResult {
    /// The converged candidate, or the best available one.
    pub root: f64,
    /// Error estimate of the last logged iteration.
    pub error: Option<f64>,
    /// Index of the last iteration attempted.
    pub iterations: u32,
    /// Terminal state.
    pub termination: Termination,
    /// One record per completed iteration.
    pub trace: Vec<IterationRecord>,
}

impl SolveResult {
    /// Returns true if the run converged.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Returns true if the run spent its iteration budget.
    pub fn is_exhausted(&self) -> bool {
        self.termination == Termination::Exhausted
    }

    /// Returns true if the run hit a zero denominator.
    pub fn is_degenerate(&self) -> bool {
        self.termination == Termination::Degenerate
    }
}

/// Outcome of a single step.
pub(crate) enum StepOutcome {
    /// A candidate was produced.
    Advanced(IterationRecord),
    /// The update's denominator was zero; no candidate exists.
    Degenerate,
}

/// Runs `step` until it converges, degenerates or spends the budget.
///
/// `seed_root` is reported as the root if the very first step degenerates.
pub(crate) fn iterate<S>(
    method: &'static str,
    config: &SolverConfig,
    seed_root: f64,
    mut step: S,
) -> MathResult<SolveResult>
where
    S: FnMut(u32) -> MathResult<StepOutcome>,
{
    if config.max_iterations == 0 {
        return Err(MathError::invalid_input(
            "max_iterations must be at least 1",
        ));
    }

    let mut records = Vec::new();
    let mut root = seed_root;
    let mut error = None;

    for iteration in 1..=config.max_iterations {
        let record = match step(iteration)? {
            StepOutcome::Advanced(record) => record,
            StepOutcome::Degenerate => {
                debug!(
                    "{}: zero denominator at iteration {}, stopping at x = {}",
                    method, iteration, root
                );
                return Ok(SolveResult {
                    root,
                    error,
                    iterations: iteration,
                    termination: Termination::Degenerate,
                    trace: records,
                });
            }
        };

        trace!("{}: {:?}", method, record);

        root = record.candidate;
        error = record.error;
        let exact = record.f_candidate == Some(0.0);
        let within_tolerance = record.error.is_some_and(|e| e < config.tolerance);
        records.push(record);

        if exact || within_tolerance {
            debug!(
                "{}: converged to {} after {} iterations",
                method, root, iteration
            );
            return Ok(SolveResult {
                root,
                error,
                iterations: iteration,
                termination: Termination::Converged,
                trace: records,
            });
        }
    }

    debug!(
        "{}: no convergence after {} iterations, last candidate {}",
        method, config.max_iterations, root
    );
    Ok(SolveResult {
        root,
        error,
        iterations: config.max_iterations,
        termination: Termination::Exhausted,
        trace: records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_zero_budget_rejected() {
        let f = |x: f64| x - 1.0;
        let config = SolverConfig::new(1e-6, 0);

        assert!(matches!(
            bisection(&f, 0.0, 2.0, &config),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            secant(&f, 0.0, 2.0, &config),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_exact_zero_checked_before_tolerance() {
        // The first midpoint of [0, 2] is the root itself.
        let f = |x: f64| x - 1.0;
        let result = bisection(&f, 0.0, 2.0, &SolverConfig::new(1e-6, 50)).unwrap();

        assert!(result.converged());
        assert_eq!(result.iterations, 1);
        assert_eq!(result.root, 1.0);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_evaluation_error_propagates() {
        struct Failing;

        impl Objective for Failing {
            fn evaluate(&self, x: f64) -> MathResult<f64> {
                if x > 1.2 {
                    Err(MathError::domain("failing", x))
                } else {
                    Ok(x - 1.3)
                }
            }
        }

        let result = bisection(&Failing, 0.0, 2.0, &SolverConfig::new(1e-6, 50));
        assert!(matches!(result, Err(MathError::Domain { .. })));
    }

    #[test]
    fn test_record_values_order() {
        let record = IterationRecord {
            iteration: 2,
            step: Step::Bracket { a: 1.0, b: 2.0 },
            candidate: 1.5,
            f_candidate: Some(-0.125),
            error: Some(0.5),
        };
        assert_eq!(
            record.values(),
            vec![Some(1.0), Some(2.0), Some(1.5), Some(-0.125), Some(0.5)]
        );

        let record = IterationRecord {
            iteration: 1,
            step: Step::Open { x0: 0.5 },
            candidate: 0.8776,
            f_candidate: None,
            error: Some(0.3776),
        };
        assert_eq!(record.values(), vec![Some(0.5), Some(0.8776), Some(0.3776)]);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = IterationRecord {
            iteration: 1,
            step: Step::Secant { x0: 1.0, x1: 2.0 },
            candidate: 1.25,
            f_candidate: Some(0.5),
            error: Some(0.75),
        };
        let json = serde_json::to_value(record).unwrap();

        assert_eq!(json["iteration"], 1);
        assert_eq!(json["x0"], 1.0);
        assert_eq!(json["x1"], 2.0);
        assert_eq!(json["candidate"], 1.25);
        assert!(json.get("step").is_none());
    }

    // ============ Cross-method agreement ============

    #[test]
    fn test_all_methods_agree_on_cubic() {
        let f = |x: f64| x * x * x - x - 2.0;
        let df = |x: f64| 3.0 * x * x - 1.0;
        let g = |x: f64| (x + 2.0).cbrt();
        let config = SolverConfig::new(1e-10, 200);

        let roots = [
            bisection(&f, 1.0, 2.0, &config).unwrap().root,
            regula_falsi(&f, 1.0, 2.0, &config).unwrap().root,
            secant(&f, 1.0, 2.0, &config).unwrap().root,
            newton_raphson(&f, &df, 1.5, &config).unwrap().root,
            fixed_point(&g, 1.5, &config).unwrap().root,
            modified_secant(&f, 1.5, 0.01, &config).unwrap().root,
        ];

        for root in roots {
            assert_relative_eq!(root, 1.5213797068045676, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_newton_fewer_iterations_than_bisection() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;
        let config = SolverConfig::new(1e-9, 100);

        let newton = newton_raphson(&f, &df, 1.0, &config).unwrap();
        let bisect = bisection(&f, 1.0, 2.0, &config).unwrap();

        assert!(newton.iterations < bisect.iterations);
    }

    // ============ Invariants ============

    fn trace_length_holds(result: &SolveResult) -> bool {
        let logged = result.trace.len() as u32;
        if result.is_degenerate() {
            logged + 1 == result.iterations
        } else {
            logged == result.iterations
        }
    }

    proptest! {
        #[test]
        fn prop_trace_length_matches_iterations(
            c in -5.0f64..5.0,
            spread in 0.1f64..4.0,
            tol_exp in 1i32..12,
            max_iter in 1u32..60,
        ) {
            let f = |x: f64| x * x * x - c;
            let df = |x: f64| 3.0 * x * x;
            // Contracts towards c, the fixed point.
            let g = |x: f64| (x + c) / 2.0;
            let config = SolverConfig::new(10f64.powi(-tol_exp), max_iter);
            let lo = c.cbrt() - spread;
            let hi = c.cbrt() + spread;

            let results = [
                bisection(&f, lo, hi, &config).unwrap(),
                regula_falsi(&f, lo, hi, &config).unwrap(),
                secant(&f, lo, hi, &config).unwrap(),
                newton_raphson(&f, &df, hi, &config).unwrap(),
                modified_secant(&f, hi, 0.01, &config).unwrap(),
                fixed_point(&g, hi, &config).unwrap(),
            ];

            for result in &results {
                prop_assert!(trace_length_holds(result));
                prop_assert!(result.iterations <= max_iter);
            }
        }

        #[test]
        fn prop_bisection_keeps_sign_change(
            c in -10.0f64..10.0,
            left in 0.1f64..5.0,
            right in 0.1f64..5.0,
        ) {
            let f = |x: f64| x - c;
            let result = bisection(&f, c - left, c + right, &SolverConfig::new(1e-9, 80)).unwrap();

            for record in &result.trace {
                if let Step::Bracket { a, b } = record.step {
                    prop_assert!(f(a) * f(b) < 0.0);
                } else {
                    prop_assert!(false, "bisection logged a non-bracket step");
                }
            }
        }
    }
}
