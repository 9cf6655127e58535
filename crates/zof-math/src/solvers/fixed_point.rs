//! Fixed-point iteration.

use crate::error::MathResult;
use crate::solvers::{
    iterate, IterationRecord, Objective, SolveResult, SolverConfig, Step, StepOutcome,
};

/// Fixed-point iteration `x_{n+1} = g(x_n)`.
///
/// `g` is a rearrangement of `f(x) = 0` into `x = g(x)` chosen by the caller;
/// `f` itself is never evaluated, so records carry no function value.
/// Convergence depends entirely on `g` (roughly `|g'| < 1` near the fixed
/// point). Divergence is only detected by exhausting the budget.
///
/// # Arguments
///
/// * `g` - The iteration function
/// * `initial_guess` - Starting point for the iteration
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use zof_math::solvers::{fixed_point, SolverConfig};
///
/// // x = cos(x) (Dottie number)
/// let g = |x: f64| x.cos();
///
/// let result = fixed_point(&g, 0.5, &SolverConfig::new(1e-6, 100)).unwrap();
/// assert!((result.root - 0.739085).abs() < 1e-5);
/// ```
pub fn fixed_point<G>(g: &G, initial_guess: f64, config: &SolverConfig) -> MathResult<SolveResult>
where
    G: Objective + ?Sized,
{
    let mut x = initial_guess;

    iterate("fixed_point", config, initial_guess, |iteration| {
        let x_next = g.evaluate(x)?;
        let record = IterationRecord {
            iteration,
            step: Step::Open { x0: x },
            candidate: x_next,
            f_candidate: None,
            error: Some((x_next - x).abs()),
        };
        x = x_next;

        Ok(StepOutcome::Advanced(record))
    })
}
