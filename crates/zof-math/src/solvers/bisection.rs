//! Bisection root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{
    iterate, IterationRecord, Objective, SolveResult, SolverConfig, Step, StepOutcome,
};

/// Bisection root-finding algorithm.
///
/// A simple and reliable bracketing method that works by repeatedly
/// halving the interval and keeping the half whose endpoints still
/// straddle the root.
///
/// Expects: `f(a) * f(b) < 0` (opposite signs at endpoints). This is not
/// checked; a bracket without a sign change simply converges on one end.
///
/// The error estimate is the distance between successive midpoints, so
/// the first iteration has none. There is no degenerate case.
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `a` - Left end of the bracket
/// * `b` - Right end of the bracket
/// * `config` - Solver configuration
///
/// # Example
///
/// ```rust
/// use zof_math::solvers::{bisection, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
///
/// let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn bisection<F>(f: &F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolveResult>
where
    F: Objective + ?Sized,
{
    let mut a = a;
    let mut b = b;
    let mut prev: Option<(f64, f64)> = None;

    iterate("bisection", config, (a + b) / 2.0, |iteration| {
        // Shrink the bracket around the previous midpoint. Deferred to here so
        // f(a) is never evaluated once the run has stopped.
        if let Some((mid, f_mid)) = prev {
            if f.evaluate(a)? * f_mid < 0.0 {
                b = mid;
            } else {
                a = mid;
            }
        }

        let mid = (a + b) / 2.0;
        let f_mid = f.evaluate(mid)?;
        let error = prev.map(|(prev_mid, _)| (mid - prev_mid).abs());

        let record = IterationRecord {
            iteration,
            step: Step::Bracket { a, b },
            candidate: mid,
            f_candidate: Some(f_mid),
            error,
        };
        prev = Some((mid, f_mid));

        Ok(StepOutcome::Advanced(record))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_scenario() {
        let f = |x: f64| x * x * x - x - 2.0;

        let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-6, 50)).unwrap();

        assert!(result.converged());
        assert!(result.iterations < 50);
        assert!(result.error.unwrap() < 1e-6);
        assert_relative_eq!(result.root, 1.521379706, epsilon = 1e-5);
        assert_eq!(result.trace.len(), result.iterations as usize);
    }

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-12, 100)).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_first_record_has_no_error() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-6, 50)).unwrap();
        let first = result.trace[0];

        assert_eq!(first.iteration, 1);
        assert_eq!(first.step, Step::Bracket { a: 1.0, b: 2.0 });
        assert_eq!(first.candidate, 1.5);
        assert_eq!(first.f_candidate, Some(0.25));
        assert_eq!(first.error, None);
    }

    #[test]
    fn test_bracket_updates() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-6, 50)).unwrap();

        // f(1.5) > 0 so the right end moves in, then f(1.25) < 0 moves the left end.
        assert_eq!(result.trace[1].step, Step::Bracket { a: 1.0, b: 1.5 });
        assert_eq!(result.trace[2].step, Step::Bracket { a: 1.25, b: 1.5 });
        assert_eq!(result.trace[1].error, Some(0.25));
    }

    #[test]
    fn test_exhausted_budget() {
        let f = |x: f64| x * x - 2.0;

        let result = bisection(&f, 1.0, 2.0, &SolverConfig::new(1e-12, 5)).unwrap();

        assert!(result.is_exhausted());
        assert_eq!(result.iterations, 5);
        assert_eq!(result.trace.len(), 5);
        assert_eq!(result.root, result.trace[4].candidate);
        assert!(result.error.unwrap() > 1e-12);
    }

    #[test]
    fn test_negative_root() {
        let f = |x: f64| x + 1.0;

        let result = bisection(&f, -3.0, 0.0, &SolverConfig::new(1e-10, 100)).unwrap();

        assert_relative_eq!(result.root, -1.0, epsilon = 1e-9);
    }
}
