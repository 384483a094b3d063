//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `tc-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing provider answered with HTTP {code}")]
    Status { code: u16 },

    #[error("routing provider error: {0}")]
    Provider(String),

    #[error("could not decode routing response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SpatialError {
    /// `true` for failures worth another attempt: transport errors and 5xx
    /// responses.  Client errors (4xx) and malformed payloads are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            SpatialError::Http(_) => true,
            SpatialError::Status { code } => *code >= 500,
            SpatialError::Provider(_) | SpatialError::Decode(_) => false,
        }
    }
}

pub type SpatialResult<T> = Result<T, SpatialError>;
