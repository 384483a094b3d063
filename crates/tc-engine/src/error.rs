use tc_corridor::CorridorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} answered with HTTP {code}")]
    Status { service: &'static str, code: u16 },

    #[error("could not decode {service} response: {reason}")]
    Decode { service: &'static str, reason: String },

    #[error("corridor error: {0}")]
    Corridor(#[from] CorridorError),
}

pub type EngineResult<T> = Result<T, EngineError>;
