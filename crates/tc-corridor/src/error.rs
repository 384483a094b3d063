//! Error types for tc-corridor.

use thiserror::Error;

/// Errors from loading corridor data or persisting learned weights.
#[derive(Debug, Error)]
pub enum CorridorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corridor parse error: {0}")]
    Parse(String),

    #[error("weight table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Alias for `Result<T, CorridorError>`.
pub type CorridorResult<T> = Result<T, CorridorError>;
