use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to open input {}: {source}", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
