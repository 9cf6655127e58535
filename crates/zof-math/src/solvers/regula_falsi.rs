//! Regula falsi (false position) root-finding algorithm.

use crate::error::MathResult;
use crate::solvers::{
    iterate, IterationRecord, Objective, SolveResult, SolverConfig, Step, StepOutcome,
};

/// Regula falsi root-finding algorithm.
///
/// Like bisection it keeps a bracket `[a, b]`, but the new point is where
/// the chord through `(a, f(a))` and `(b, f(b))` crosses zero:
///
/// `r = b - f(b) * (b - a) / (f(b) - f(a))`
///
/// The endpoint sharing a sign with `f(r)` is replaced. The error estimate is
/// the distance between successive interpolation points, so the first
/// iteration has none.
///
/// Stops as [`Termination::Degenerate`](crate::solvers::Termination::Degenerate)
/// when `f(b) == f(a)`. If that happens on the first iteration the reported
/// root is `b`.
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
/// use zof_math::solvers::{regula_falsi, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
///
/// let result = regula_falsi(&f, 1.0, 2.0, &SolverConfig::new(1e-10, 100)).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
pub fn regula_falsi<F>(f: &F, a: f64, b: f64, config: &SolverConfig) -> MathResult<SolveResult>
where
    F: Objective + ?Sized,
{
    let mut a = a;
    let mut b = b;
    let mut prev_r: Option<f64> = None;

    iterate("regula_falsi", config, b, |iteration| {
        let fa = f.evaluate(a)?;
        let fb = f.evaluate(b)?;

        let denom = fb - fa;
        if denom == 0.0 {
            return Ok(StepOutcome::Degenerate);
        }

        let r = b - fb * (b - a) / denom;
        let fr = f.evaluate(r)?;
        let error = prev_r.map(|prev| (r - prev).abs());

        let record = IterationRecord {
            iteration,
            step: Step::Bracket { a, b },
            candidate: r,
            f_candidate: Some(fr),
            error,
        };

        if fa * fr < 0.0 {
            b = r;
        } else {
            a = r;
        }
        prev_r = Some(r);

        Ok(StepOutcome::Advanced(record))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic() {
        let f = |x: f64| x * x * x - x - 2.0;

        let result = regula_falsi(&f, 1.0, 2.0, &SolverConfig::new(1e-8, 100)).unwrap();

        assert!(result.converged());
        assert_relative_eq!(result.root, 1.5213797068, epsilon = 1e-7);
        assert_eq!(result.trace.len(), result.iterations as usize);
    }

    #[test]
    fn test_first_interpolation_point() {
        let f = |x: f64| x * x * x - x - 2.0;

        let result = regula_falsi(&f, 1.0, 2.0, &SolverConfig::new(1e-8, 100)).unwrap();
        let first = result.trace[0];

        // f(1) = -2, f(2) = 4: r = 2 - 4 * 1 / 6
        assert_relative_eq!(first.candidate, 4.0 / 3.0, epsilon = 1e-15);
        assert_eq!(first.error, None);

        // f(4/3) < 0, same sign as f(1), so the left end moves.
        assert_eq!(
            result.trace[1].step,
            Step::Bracket {
                a: first.candidate,
                b: 2.0
            }
        );
        assert!(result.trace[1].error.is_some());
    }

    #[test]
    fn test_symmetric_bracket_is_degenerate() {
        // f(-2) == f(2): the chord is horizontal.
        let f = |x: f64| x * x - 1.0;

        let result = regula_falsi(&f, -2.0, 2.0, &SolverConfig::new(1e-8, 100)).unwrap();

        assert!(result.is_degenerate());
        assert_eq!(result.iterations, 1);
        assert!(result.trace.is_empty());
        assert_eq!(result.root, 2.0);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_exact_root_on_first_step() {
        // Linear f: the chord is f itself, so the first point is exact.
        let f = |x: f64| 2.0 * x - 1.0;

        let result = regula_falsi(&f, 0.0, 1.0, &SolverConfig::new(1e-8, 100)).unwrap();

        assert!(result.converged());
        assert_eq!(result.iterations, 1);
        assert_eq!(result.root, 0.5);
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_exhausted_budget() {
        let f = |x: f64| x.exp() - 10.0;

        let result = regula_falsi(&f, 0.0, 5.0, &SolverConfig::new(1e-14, 3)).unwrap();

        assert!(result.is_exhausted());
        assert_eq!(result.iterations, 3);
        assert_eq!(result.root, result.trace[2].candidate);
    }
}
