//! Newton-Raphson root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{
    iterate, IterationRecord, Objective, SolveResult, SolverConfig, Step, StepOutcome,
};

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration:
/// `x_{n+1} = x_n - f(x_n) / f'(x_n)`
///
/// This method has quadratic convergence near a simple root but requires
/// the derivative of the function. For parsed expressions, obtain it with
/// [`Expression::derivative`](crate::expression::Expression::derivative).
///
/// When `f'(x_n) == 0` the run stops as
/// [`Termination::Degenerate`](crate::solvers::Termination::Degenerate)
/// and reports `x_n` as the root.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `df` - The derivative of the function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use zof_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(&f, &df, 1.0, &SolverConfig::new(1e-9, 20)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: &F,
    df: &DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolveResult>
where
    F: Objective + ?Sized,
    DF: Objective + ?Sized,
{
    let mut x = initial_guess;

    iterate("newton_raphson", config, initial_guess, |iteration| {
        let fx = f.evaluate(x)?;
        let dfx = df.evaluate(x)?;

        if dfx == 0.0 {
            return Ok(StepOutcome::Degenerate);
        }

        let x_next = x - fx / dfx;
        let record = IterationRecord {
            iteration,
            step: Step::Open { x0: x },
            candidate: x_next,
            f_candidate: Some(f.evaluate(x_next)?),
            error: Some((x_next - x).abs()),
        };
        x = x_next;

        Ok(StepOutcome::Advanced(record))
    })
}
