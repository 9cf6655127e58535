//! Modified secant root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{
    iterate, IterationRecord, Objective, SolveResult, SolverConfig, Step, StepOutcome,
};

/// Modified secant root-finding algorithm.
///
/// A Newton step whose derivative is replaced by a forward difference with
/// a relative perturbation `delta`:
///
/// `x_{n+1} = x_n - f(x_n) * delta * x_n / (f(x_n * (1 + delta)) - f(x_n))`
///
/// When the probe value equals `f(x_n)` the run stops as
/// [`Termination::Degenerate`](crate::solvers::Termination::Degenerate)
/// and reports `x_n` as the root. With `x_n == 0` the probe point is `x_n`
/// itself, so the step is always degenerate there.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for the iteration
/// * `delta` - Relative perturbation fraction (e.g. `0.01`)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use zof_math::solvers::{modified_secant, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = modified_secant(&f, 1.0, 0.01, &SolverConfig::new(1e-10, 50)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn modified_secant<F>(
    f: &F,
    initial_guess: f64,
    delta: f64,
    config: &SolverConfig,
) -> MathResult<SolveResult>
where
    F: Objective + ?Sized,
{
    let mut x = initial_guess;

    iterate("modified_secant", config, initial_guess, |iteration| {
        let fx = f.evaluate(x)?;
        let f_probe = f.evaluate(x * (1.0 + delta))?;

        let denom = f_probe - fx;
        if denom == 0.0 {
            return Ok(StepOutcome::Degenerate);
        }

        let x_next = x - fx * delta * x / denom;
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = modified_secant(&f, 1.0, 0.01, &SolverConfig::new(1e-10, 50)).unwrap();

        assert!(result.converged());
        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_first_step_formula() {
        let f = |x: f64| x * x - 2.0;

        let result = modified_secant(&f, 1.0, 0.5, &SolverConfig::new(1e-10, 50)).unwrap();
        let first = result.trace[0];

        // f(1) = -1, f(1.5) = 0.25: x1 = 1 + 1 * 0.5 / 1.25
        assert_eq!(first.step, Step::Open { x0: 1.0 });
        assert_relative_eq!(first.candidate, 1.4, epsilon = 1e-15);
        assert_relative_eq!(first.error.unwrap(), 0.4, epsilon = 1e-15);
    }

    #[test]
    fn test_symmetric_probe_is_degenerate() {
        // delta = -2 probes at -x0, where an even function repeats its value.
        let f = |x: f64| x * x - 4.0;

        let result = modified_secant(&f, 1.0, -2.0, &SolverConfig::default()).unwrap();

        assert!(result.is_degenerate());
        assert_eq!(result.iterations, 1);
        assert!(result.trace.is_empty());
        assert_eq!(result.root, 1.0);
    }

    #[test]
    fn test_zero_seed_is_degenerate() {
        let f = |x: f64| x - 1.0;

        let result = modified_secant(&f, 0.0, 0.01, &SolverConfig::default()).unwrap();

        assert!(result.is_degenerate());
        assert_eq!(result.root, 0.0);
    }

    #[test]
    fn test_exhausted_budget() {
        let f = |x: f64| x.exp() - 5.0;

        let result = modified_secant(&f, 3.0, 0.01, &SolverConfig::new(1e-15, 2)).unwrap();

        assert!(result.is_exhausted());
        assert_eq!(result.iterations, 2);
        assert_eq!(result.root, result.trace[1].candidate);
    }
}
