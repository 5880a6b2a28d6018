use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::{RunConfig, RunMode};
use crate::error::Result;

pub mod aggregate;
pub mod ingest;
pub mod normalize;
pub mod sentiment;
pub mod stream;

use self::aggregate::RunSummary;
use self::ingest::{RecordSource, RejectedRecord, ValidationOutcome};
use self::normalize::{Normalizer, TextNormalizer};
use self::sentiment::{ScoredRecord, Scorer, SentimentScorer};
use self::stream::Chunks;

/// Everything a finished pipeline run produced.
#[derive(Debug, Serialize)]
pub struct RunResult {
    /// Unique id assigned to this run
    pub run_id: Uuid,
    /// Mode the run executed in
    pub mode: RunMode,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Scored records, in input order
    pub records: Vec<ScoredRecord>,
    /// Screened-out lines, in input order
    pub rejected: Vec<RejectedRecord>,
    /// Run-level statistics
    pub summary: RunSummary,
}

/// Tally from a validation-only pass over a dataset.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Outcomes inspected (valid and rejected; blank lines never count)
    pub total: usize,
    /// Lines that would enter scoring
    pub valid: usize,
    /// Lines that would be screened out
    pub rejected: Vec<RejectedRecord>,
}

/// Drives source, normalizer, scorer, and aggregator over one dataset.
///
/// Batch mode drains the source in one pass. Stream mode pulls through the
/// chunking adapter so delivery is paced, but the records flow through the
/// very same stages, which is what keeps the two modes' outputs identical.
pub struct PipelineRunner {
    normalizer: TextNormalizer,
    scorer: SentimentScorer,
}

impl PipelineRunner {
    pub fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            scorer: SentimentScorer::new(),
        }
    }

    #[instrument(skip(self, config), fields(input = %config.input.display(), mode = %config.mode))]
    pub fn run(&self, config: &RunConfig) -> Result<RunResult> {
        config.validate()?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, "starting sentiment pipeline");

        let source = RecordSource::new(&config.input).with_max_records(config.max_records);
        let outcomes = source.outcomes()?;

        let mut records = Vec::new();
        let mut rejected = Vec::new();

        match config.mode {
            RunMode::Batch => {
                for outcome in outcomes {
                    self.absorb(outcome, &mut records, &mut rejected);
                }
            }
            RunMode::Stream => {
                let chunks = Chunks::new(outcomes, config.chunk_size, config.delay);
                for (index, chunk) in chunks.enumerate() {
                    debug!(chunk = index + 1, size = chunk.len(), "processing chunk");
                    for outcome in chunk {
                        self.absorb(outcome, &mut records, &mut rejected);
                    }
                }
            }
        }

        let summary = RunSummary::from_records(&records, rejected.len());
        info!(
            scored = summary.total_records,
            rejected = summary.rejected_records,
            "pipeline run complete"
        );

        Ok(RunResult {
            run_id,
            mode: config.mode,
            started_at,
            finished_at: Utc::now(),
            records,
            rejected,
            summary,
        })
    }

    /// Screen the dataset without scoring it.
    #[instrument(skip(self, config), fields(input = %config.input.display()))]
    pub fn validate(&self, config: &RunConfig) -> Result<ValidationReport> {
        let source = RecordSource::new(&config.input).with_max_records(config.max_records);

        let mut total = 0;
        let mut valid = 0;
        let mut rejected = Vec::new();
        for outcome in source.outcomes()? {
            total += 1;
            match outcome {
                ValidationOutcome::Valid(_) => valid += 1,
                ValidationOutcome::Rejected(record) => rejected.push(record),
            }
        }

        info!(total, valid, rejected = rejected.len(), "validation pass complete");
        Ok(ValidationReport {
            total,
            valid,
            rejected,
        })
    }

    fn absorb(
        &self,
        outcome: ValidationOutcome,
        records: &mut Vec<ScoredRecord>,
        rejected: &mut Vec<RejectedRecord>,
    ) {
        match outcome {
            ValidationOutcome::Valid(record) => {
                let normalized = self.normalizer.normalize(&record.text);
                let scores = self.scorer.score(&normalized);
                debug!(line = record.line, compound = scores.compound, "scored record");
                records.push(ScoredRecord::new(record, scores));
            }
            ValidationOutcome::Rejected(record) => {
                warn!(line = record.line, reason = %record.reason, "rejected input line");
                rejected.push(record);
            }
        }
    }
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new()
    }
}
