//! Request handlers.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use zof_math::problem::{Method, MethodParams, Problem, Solution, DEFAULT_DELTA};
use zof_math::SolverConfig;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::html::{self, Page};

/// Application state.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// SOLVING
// =============================================================================

/// Caps the iteration budget and runs the solve on the blocking pool.
///
/// The solve itself cannot be interrupted. On timeout the request fails
/// while the task runs out its (capped) budget in the background.
pub async fn run_problem(config: &ServerConfig, mut problem: Problem) -> Result<Solution, ApiError> {
    problem.config.max_iterations = problem.config.max_iterations.min(config.max_iterations_limit);
    debug!(
        method = problem.method().slug(),
        equation = %problem.equation,
        max_iterations = problem.config.max_iterations,
        "Solving"
    );

    let limit = config.solve_timeout_ms;
    let task = tokio::task::spawn_blocking(move || problem.solve());

    match tokio::time::timeout(Duration::from_millis(limit), task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(e)) => Err(ApiError::Internal(e.to_string())),
        Err(_) => {
            warn!("Solve exceeded {} ms", limit);
            Err(ApiError::Timeout(limit))
        }
    }
}

/// Solve a JSON problem.
pub async fn solve(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Problem>, JsonRejection>,
) -> Result<Json<Solution>, ApiError> {
    let Json(problem) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let solution = run_problem(&state.config, problem).await?;

    info!(
        method = solution.method.slug(),
        iterations = solution.result.iterations,
        termination = %solution.result.termination,
        "Solved"
    );
    Ok(Json(solution))
}

/// One entry of the method listing.
#[derive(Debug, Serialize)]
pub struct MethodInfo {
    /// Selector used in requests.
    pub method: Method,
    /// Display name.
    pub name: &'static str,
    /// Method-specific request fields.
    pub parameters: &'static [&'static str],
    /// Column headers of the trace.
    pub trace_columns: &'static [&'static str],
}

/// List the available methods.
pub async fn list_methods() -> Json<Vec<MethodInfo>> {
    let methods = Method::all()
        .iter()
        .map(|&method| MethodInfo {
            method,
            name: method.name(),
            parameters: method.parameters(),
            trace_columns: method.trace_columns(),
        })
        .collect();
    Json(methods)
}

// =============================================================================
// WEB FORM
// =============================================================================

/// Fields of the HTML form, kept as submitted so they can be echoed back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SolveForm {
    /// Equation f(x)
    pub equation: String,
    /// Method selector
    pub method: String,
    /// Tolerance
    pub tol: String,
    /// Iteration budget
    pub max_iter: String,
    /// Bracket left end
    pub a: String,
    /// Bracket right end
    pub b: String,
    /// First starting point
    pub x0: String,
    /// Second starting point
    pub x1: String,
    /// Fixed-point rearrangement
    pub g_expr: String,
    /// Modified secant perturbation
    pub delta: String,
}

fn field<T: FromStr>(name: &str, text: &str, default: Option<T>) -> Result<T, ApiError> {
    let text = text.trim();
    match default {
        Some(value) if text.is_empty() => Ok(value),
        _ => text
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("Invalid number for {}: '{}'", name, text))),
    }
}

impl SolveForm {
    /// Builds the problem for `method` from the submitted text.
    ///
    /// Blank tolerance, budget and delta take their defaults. Every other
    /// numeric field is required.
    pub fn to_problem(&self, method: Method) -> Result<Problem, ApiError> {
        let defaults = SolverConfig::default();
        let config = SolverConfig::new(
            field("tol", &self.tol, Some(defaults.tolerance))?,
            field("max_iter", &self.max_iter, Some(defaults.max_iterations))?,
        );

        let params = match method {
            Method::Bisection => MethodParams::Bisection {
                a: field("a", &self.a, None)?,
                b: field("b", &self.b, None)?,
            },
            Method::RegulaFalsi => MethodParams::RegulaFalsi {
                a: field("a", &self.a, None)?,
                b: field("b", &self.b, None)?,
            },
            Method::Secant => MethodParams::Secant {
                x0: field("x0", &self.x0, None)?,
                x1: field("x1", &self.x1, None)?,
            },
            Method::NewtonRaphson => MethodParams::NewtonRaphson {
                x0: field("x0", &self.x0, None)?,
            },
            Method::FixedPoint => MethodParams::FixedPoint {
                x0: field("x0", &self.x0, None)?,
                g: self.g_expr.trim().to_string(),
            },
            Method::ModifiedSecant => MethodParams::ModifiedSecant {
                x0: field("x0", &self.x0, None)?,
                delta: field("delta", &self.delta, Some(DEFAULT_DELTA))?,
            },
        };

        Ok(Problem::new(self.equation.trim(), params, config))
    }
}

/// Render the empty form.
pub async fn form_page() -> Html<String> {
    Html(html::render(&Page::default()))
}

/// Solve a submitted form and re-render it with the result.
///
/// An unrecognised method is answered with a notice and no solve.
pub async fn form_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SolveForm>,
) -> (StatusCode, Html<String>) {
    let Ok(method) = Method::from_str(&form.method) else {
        let notice = format!("Unknown method '{}'. Choose one from the list.", form.method);
        let page = Page {
            form: Some(&form),
            notice: Some(&notice),
            ..Page::default()
        };
        return (StatusCode::OK, Html(html::render(&page)));
    };

    let outcome = match form.to_problem(method) {
        Ok(problem) => run_problem(&state.config, problem).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(solution) => {
            let page = Page {
                form: Some(&form),
                solution: Some(&solution),
                ..Page::default()
            };
            (StatusCode::OK, Html(html::render(&page)))
        }
        Err(e) => {
            let message = e.to_string();
            let page = Page {
                form: Some(&form),
                error: Some(&message),
                ..Page::default()
            };
            (e.status(), Html(html::render(&page)))
        }
    }
}
