//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface a coordinate or time parse failure that
//! originated here.

use thiserror::Error;

/// The base error type for `tc-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid coordinate {0:?}: expected \"lat,lon\"")]
    Coordinate(String),

    #[error("invalid departure time {0:?}")]
    Time(String),
}

/// Shorthand result type for `tc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
