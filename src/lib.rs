pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod sample;

pub use config::{RunConfig, RunMode};
pub use error::{PipelineError, Result};
pub use pipeline::{PipelineRunner, RunResult, ValidationReport};
