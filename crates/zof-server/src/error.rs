//! API error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use zof_math::MathError;

/// Errors returned by the solve endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be read.
    #[error("{0}")]
    BadRequest(String),

    /// The solver rejected the problem.
    #[error(transparent)]
    Math(#[from] MathError),

    /// The solve ran past the configured wall-clock limit.
    #[error("Solve did not finish within {0} ms")]
    Timeout(u64),

    /// The blocking solve task failed.
    #[error("Solver task failed: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Math(MathError::Parse { .. } | MathError::Domain { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Math(MathError::UnknownMethod { .. } | MathError::InvalidInput { .. }) => {
                StatusCode::BAD_REQUEST
            }
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Math(MathError::parse(3, "unknown symbol 'y'")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Math(MathError::domain("sqrt(x)", -1.0)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Math(MathError::invalid_input("max_iterations must be at least 1")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Timeout(50).status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            ApiError::Timeout(250).to_string(),
            "Solve did not finish within 250 ms"
        );
    }
}
