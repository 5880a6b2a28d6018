use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Default number of records per simulated chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1;

/// How the pipeline consumes the input dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Drain the whole dataset in one pass.
    Batch,
    /// Deliver records in fixed-size chunks with an optional pause between them.
    Stream,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Batch => write!(f, "batch"),
            RunMode::Stream => write!(f, "stream"),
        }
    }
}

/// Everything a single pipeline run needs to know. Built from CLI arguments,
/// optionally seeded from a config file.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub mode: RunMode,
    pub chunk_size: usize,
    pub delay: Duration,
    pub max_records: Option<usize>,
}

impl RunConfig {
    pub fn batch(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            mode: RunMode::Batch,
            chunk_size: DEFAULT_CHUNK_SIZE,
            delay: Duration::ZERO,
            max_records: None,
        }
    }

    pub fn stream(input: impl Into<PathBuf>, chunk_size: usize, delay: Duration) -> Self {
        Self {
            input: input.into(),
            mode: RunMode::Stream,
            chunk_size,
            delay,
            max_records: None,
        }
    }

    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(PipelineError::Config(
                "chunk size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional `config.toml` defaults. CLI flags always win over these.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub pipeline: PipelineDefaults,
    #[serde(default)]
    pub output: OutputDefaults,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PipelineDefaults {
    pub chunk_size: usize,
    pub delay_ms: u64,
    pub max_records: Option<usize>,
}

impl Default for PipelineDefaults {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            delay_ms: 0,
            max_records: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    pub results_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for OutputDefaults {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: FileConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
