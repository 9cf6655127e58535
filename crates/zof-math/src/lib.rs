//! # ZOF Math
//!
//! Root finding for a single-variable real function.
//!
//! This crate provides:
//!
//! - **Expressions**: a small expression language with evaluation and symbolic
//!   first derivatives (`x**3 - x - 2`, `cos(x)`, `exp(-x) - x`)
//! - **Solvers**: bisection, regula falsi, secant, Newton-Raphson, fixed-point
//!   iteration and modified secant, all sharing one iteration driver and one
//!   trace format
//! - **Problems**: a method selector plus parameters that both front ends hand
//!   to [`problem::Problem::solve`]
//!
//! ## Design Philosophy
//!
//! - **Traceable**: every run returns the full iteration trace
//! - **Literal**: stopping rules use exact comparisons, so results match the
//!   textbook formulas step for step
//! - **Uniform**: all terminal states return the same [`SolveResult`] shape

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod expression;
pub mod problem;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::expression::Expression;
    pub use crate::problem::{Method, MethodParams, Problem, Solution};
    pub use crate::solvers::{
        bisection, fixed_point, modified_secant, newton_raphson, regula_falsi, secant,
        IterationRecord, Objective, SolveResult, SolverConfig, Step, Termination,
    };
}

pub use error::{MathError, MathResult};
pub use expression::Expression;
pub use solvers::{SolveResult, SolverConfig};
