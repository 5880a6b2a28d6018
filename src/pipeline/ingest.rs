use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PipelineError, Result};

/// A feedback record parsed from one input line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RawRecord {
    /// 1-based line number the record came from
    pub line: usize,
    /// Producer-supplied identifier, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// When the feedback was recorded, if the producer supplied it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Free-form feedback text
    pub text: String,
}

/// Why an input line was kept out of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// The line is not a JSON object of the expected shape
    ParseError,
    /// The `text` field is absent
    MissingField,
    /// The `text` field is present but blank
    EmptyText,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::ParseError => "parse_error",
            RejectReason::MissingField => "missing_field",
            RejectReason::EmptyText => "empty_text",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected input line with enough context to audit it later.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    /// 1-based line number of the offending line
    pub line: usize,
    /// Why the line was rejected
    pub reason: RejectReason,
    /// The line as read from the file
    pub raw: String,
}

/// What the record source produced for one non-blank input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The line parsed into a usable record
    Valid(RawRecord),
    /// The line was screened out, with the reason preserved
    Rejected(RejectedRecord),
}

/// Wire shape of one input line. `text` stays optional here so that an
/// absent key can be told apart from a line that fails to parse at all.
#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    text: Option<String>,
}

/// Lazy line-oriented reader over a JSONL feedback dataset.
///
/// Opening is deferred to [`RecordSource::outcomes`], and every call opens the
/// file fresh, so the same source can be consumed more than once. A path that
/// cannot be opened, or that is not a regular file, is the one fatal ingestion
/// error; everything that goes wrong on a single line degrades into a
/// [`ValidationOutcome::Rejected`].
#[derive(Debug, Clone)]
pub struct RecordSource {
    path: PathBuf,
    max_records: Option<usize>,
}

impl RecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_records: None,
        }
    }

    /// Cap the number of outcomes (valid and rejected alike) the iterator
    /// will yield. `None` means read the whole file.
    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn outcomes(&self) -> Result<RecordOutcomes> {
        let file = File::open(&self.path).map_err(|source| PipelineError::InputOpen {
            path: self.path.clone(),
            source,
        })?;

        // Opening a directory succeeds on Linux even though every read from
        // it will fail, so screen the path type up front.
        let metadata = file.metadata().map_err(|source| PipelineError::InputOpen {
            path: self.path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(PipelineError::InputOpen {
                path: self.path.clone(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
            });
        }
        debug!(path = %self.path.display(), "opened input dataset");

        Ok(RecordOutcomes {
            lines: BufReader::new(file).lines(),
            line_no: 0,
            produced: 0,
            max_records: self.max_records,
        })
    }
}

/// Iterator of per-line validation outcomes, in file order.
///
/// Blank lines are skipped entirely: they produce no outcome and do not count
/// against the cap, though they still advance the line numbering.
#[derive(Debug)]
pub struct RecordOutcomes {
    lines: Lines<BufReader<File>>,
    line_no: usize,
    produced: usize,
    max_records: Option<usize>,
}

impl Iterator for RecordOutcomes {
    type Item = ValidationOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(max) = self.max_records {
            if self.produced >= max {
                return None;
            }
        }

        loop {
            let line = self.lines.next()?;
            self.line_no += 1;

            let outcome = match line {
                Ok(content) => {
                    if content.trim().is_empty() {
                        continue;
                    }
                    screen_line(&content, self.line_no)
                }
                // Undecodable bytes on this line; the reader has already
                // advanced past them, so treat it like any malformed line.
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    ValidationOutcome::Rejected(RejectedRecord {
                        line: self.line_no,
                        reason: RejectReason::ParseError,
                        raw: format!("<unreadable line: {}>", e),
                    })
                }
                // Any other read failure will repeat on every pull. End the
                // iteration instead of rejecting the same error forever.
                Err(e) => {
                    warn!(line = self.line_no, error = %e, "read failed, ending input early");
                    return None;
                }
            };

            self.produced += 1;
            return Some(outcome);
        }
    }
}

/// Validate one non-blank line. Checks run in order: JSON shape, then the
/// presence of `text`, then whether `text` has any content.
fn screen_line(content: &str, line_no: usize) -> ValidationOutcome {
    let wire: WireRecord = match serde_json::from_str(content) {
        Ok(wire) => wire,
        Err(_) => {
            return ValidationOutcome::Rejected(RejectedRecord {
                line: line_no,
                reason: RejectReason::ParseError,
                raw: content.to_string(),
            })
        }
    };

    let Some(text) = wire.text else {
        return ValidationOutcome::Rejected(RejectedRecord {
            line: line_no,
            reason: RejectReason::MissingField,
            raw: content.to_string(),
        });
    };

    if text.trim().is_empty() {
        return ValidationOutcome::Rejected(RejectedRecord {
            line: line_no,
            reason: RejectReason::EmptyText,
            raw: content.to_string(),
        });
    }

    ValidationOutcome::Valid(RawRecord {
        line: line_no,
        id: wire.id,
        timestamp: wire.timestamp,
        text,
    })
}
