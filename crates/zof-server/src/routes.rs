//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::{self, AppState};

/// Create the application router.
///
/// # Arguments
/// * `config` - Server configuration (solve timeout and iteration cap)
pub fn create_router(config: ServerConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        // Web form
        .route("/", get(handlers::form_page).post(handlers::form_submit))
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Solving
        .route("/api/v1/solve", post(handlers::solve))
        .route("/api/v1/methods", get(handlers::list_methods))
        // State
        .with_state(state)
}
