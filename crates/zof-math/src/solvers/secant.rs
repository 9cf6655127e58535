//! Secant root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{
    iterate, IterationRecord, Objective, SolveResult, SolverConfig, Step, StepOutcome,
};

/// Secant root-finding algorithm.
///
/// Similar to Newton-Raphson but approximates the derivative using
/// the line through the last two iterates:
///
/// `x2 = x1 - f(x1) * (x1 - x0) / (f(x1) - f(x0))`
///
/// Does not require an analytical derivative or a bracketing interval.
/// Convergence rate is superlinear (order ~1.618, the golden ratio).
///
/// The error estimate `|x2 - x1|` is defined from the first iteration.
/// When `f(x1) == f(x0)` the run stops as
/// [`Termination::Degenerate`](crate::solvers::Termination::Degenerate)
/// before forming `x2`, reporting the current `x1` as the root.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `x0` - First initial guess
/// * `x1` - Second initial guess (should be different from x0)
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use zof_math::solvers::{secant, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = secant(&f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn secant<F>(f: &F, x0: f64, x1: f64, config: &SolverConfig) -> MathResult<SolveResult>
where
    F: Objective + ?Sized,
{
    let mut x_prev = x0;
    let mut x_curr = x1;

    iterate("secant", config, x1, |iteration| {
        let f_prev = f.evaluate(x_prev)?;
        let f_curr = f.evaluate(x_curr)?;

        // Parallel secant line
        let denom = f_curr - f_prev;
        if denom == 0.0 {
            return Ok(StepOutcome::Degenerate);
        }

        let x_next = x_curr - f_curr * (x_curr - x_prev) / denom;
        let record = IterationRecord {
            iteration,
            step: Step::Secant {
                x0: x_prev,
                x1: x_curr,
            },
            candidate: x_next,
            f_candidate: Some(f.evaluate(x_next)?),
            error: Some((x_next - x_curr).abs()),
        };

        x_prev = x_curr;
        x_curr = x_next;

        Ok(StepOutcome::Advanced(record))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tight() -> SolverConfig {
        SolverConfig::new(1e-12, 100)
    }

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(&f, 1.0, 2.0, &tight()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_cube_root() {
        // Find cube root of 27 (should be 3)
        let f = |x: f64| x * x * x - 27.0;

        let result = secant(&f, 2.0, 4.0, &tight()).unwrap();

        assert_relative_eq!(result.root, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_sin() {
        // Find root of sin(x) near pi
        let f = |x: f64| x.sin();

        let result = secant(&f, 3.0, 3.5, &tight()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::PI, epsilon = 1e-10);
    }

    #[test]
    fn test_convergence_speed() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(&f, 1.0, 2.0, &tight()).unwrap();

        // Secant should converge reasonably fast (faster than bisection, slower than Newton)
        assert!(result.iterations < 15);
    }

    #[test]
    fn test_error_defined_from_first_iteration() {
        let f = |x: f64| x * x - 2.0;

        let result = secant(&f, 1.0, 2.0, &tight()).unwrap();
        let first = result.trace[0];

        assert_eq!(first.step, Step::Secant { x0: 1.0, x1: 2.0 });
        // f(1) = -1, f(2) = 2: x2 = 2 - 2 * 1 / 3
        assert_relative_eq!(first.candidate, 4.0 / 3.0, epsilon = 1e-15);
        assert_relative_eq!(first.error.unwrap(), 2.0 / 3.0, epsilon = 1e-15);
        assert_eq!(
            result.trace[1].step,
            Step::Secant {
                x0: 2.0,
                x1: first.candidate
            }
        );
    }

    #[test]
    fn test_exact_zero_stops_before_tolerance() {
        let f = |x: f64| 2.0 * x - 1.0;

        let result = secant(&f, 0.0, 1.0, &SolverConfig::new(1e-12, 50)).unwrap();

        assert!(result.converged());
        assert_eq!(result.iterations, 1);
        assert_eq!(result.root, 0.5);
        assert_eq!(result.trace.len(), 1);
    }

    #[test]
    fn test_equal_seed_values_degenerate_immediately() {
        let f = |x: f64| x * x - 4.0;

        let result = secant(&f, -1.0, 1.0, &tight()).unwrap();

        assert!(result.is_degenerate());
        assert_eq!(result.iterations, 1);
        assert!(result.trace.is_empty());
        assert_eq!(result.root, 1.0);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_degenerate_after_first_step() {
        // x2 = -1 and f(-1) == f(1), so the second line is horizontal.
        let f = |x: f64| x * x + 1.0;

        let result = secant(&f, 0.0, 1.0, &tight()).unwrap();

        assert!(result.is_degenerate());
        assert_eq!(result.iterations, 2);
        assert_eq!(result.trace.len(), 1);
        assert_eq!(result.root, -1.0);
        assert_eq!(result.error, Some(2.0));
    }
}
