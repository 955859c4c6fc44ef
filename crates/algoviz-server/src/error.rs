//! Error types for the algoviz server.

use algoviz_engine::EngineError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving the catalog or a run.
#[derive(Debug, Error)]
pub enum Error {
    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Bad configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine error
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl Error {
    pub fn algorithm_not_found() -> Self {
        Self::NotFound("Algorithm not found".to_string())
    }

    pub fn no_active_run() -> Self {
        Self::NotFound("No active run".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Engine(EngineError::UnknownAlgorithm(_)) => StatusCode::NOT_FOUND,
            Self::Engine(EngineError::Grid(_)) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Serialization(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
