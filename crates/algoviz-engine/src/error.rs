//! Error types for the engine.

use algoviz_grid::GridError;
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced to callers of the engine.
///
/// Generators and replay are total and never fail; these only come from
/// the edges where a caller hands the engine something it does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No built-in generator is registered under this id
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Grid construction failed
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}
