//! Error types for grass field generation

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid field config: {0}")]
    InvalidConfig(String),

    #[error("Unknown grass style: {0}")]
    UnknownStyle(String),

    #[error("Unknown field preset: {0}")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
