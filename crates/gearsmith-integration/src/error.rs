use std::path::PathBuf;

use gearsmith_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntegrationError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid catalog record {id}: {reason}")]
    InvalidRecord { id: u32, reason: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<serde_json::Error> for IntegrationError {
    fn from(err: serde_json::Error) -> Self {
        IntegrationError::Serialization(err.to_string())
    }
}
