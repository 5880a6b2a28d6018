use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::pipeline::aggregate::RunSummary;
use crate::pipeline::sentiment::{ScoredRecord, Sentiment};
use crate::pipeline::RunResult;

/// Fixed artifact names; downstream dashboards import these by name.
pub const RESULTS_CSV: &str = "sentiment_results.csv";
pub const RUN_JSON: &str = "run_summary.json";
pub const SUMMARY_REPORT: &str = "summary_report.txt";

/// CSV column set, in contract order. Must stay in sync with [`ResultRow`].
const RESULT_COLUMNS: [&str; 9] = [
    "line", "id", "timestamp", "text", "neg", "neu", "pos", "compound", "label",
];

/// Flat CSV row. The column order is part of the collaborator contract and
/// must not change between runs.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    line: usize,
    id: Option<&'a str>,
    timestamp: Option<DateTime<Utc>>,
    text: &'a str,
    neg: f64,
    neu: f64,
    pos: f64,
    compound: f64,
    label: &'a str,
}

impl<'a> From<&'a ScoredRecord> for ResultRow<'a> {
    fn from(record: &'a ScoredRecord) -> Self {
        Self {
            line: record.line,
            id: record.id.as_deref(),
            timestamp: record.timestamp,
            text: &record.text,
            neg: record.scores.neg,
            neu: record.scores.neu,
            pos: record.scores.pos,
            compound: record.scores.compound,
            label: record.label.as_str(),
        }
    }
}

/// Write per-record results as CSV, one row per scored record, in input
/// order.
pub fn write_results_csv(records: &[ScoredRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        // serialize() only emits the header alongside the first row, and an
        // empty run still has to produce an importable file.
        writer.write_record(RESULT_COLUMNS)?;
    }
    for record in records {
        writer.serialize(ResultRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Persist the whole run (records, rejects, summary, run metadata) as pretty
/// JSON.
pub fn write_run_json(result: &RunResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    Ok(())
}

/// Render the plain-text summary report.
pub fn render_summary_report(summary: &RunSummary) -> String {
    let rule = "=".repeat(40);
    let mut out = String::new();

    let _ = writeln!(out, "Sentiment Analysis Summary Report");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total messages analysed: {}", summary.total_records);
    let _ = writeln!(out, "Records rejected: {}", summary.rejected_records);
    let _ = writeln!(out);
    let _ = writeln!(out, "Sentiment distribution:");
    for label in [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral] {
        let count = match label {
            Sentiment::Positive => summary.positive,
            Sentiment::Negative => summary.negative,
            Sentiment::Neutral => summary.neutral,
        };
        let _ = writeln!(
            out,
            "  {}: {} ({:.2}%)",
            label,
            count,
            summary.label_percentage(label)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Average compound score: {:.4}", summary.mean_compound);
    let _ = writeln!(out, "{}", rule);

    out
}

pub fn write_summary_report(summary: &RunSummary, path: &Path) -> Result<()> {
    fs::write(path, render_summary_report(summary))?;
    Ok(())
}

/// Write every run artifact into `output_dir`, creating the directory if
/// needed. Returns the paths written, in a stable order.
pub fn write_all(result: &RunResult, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)?;

    let csv_path = output_dir.join(RESULTS_CSV);
    write_results_csv(&result.records, &csv_path)?;

    let json_path = output_dir.join(RUN_JSON);
    write_run_json(result, &json_path)?;

    let report_path = output_dir.join(SUMMARY_REPORT);
    write_summary_report(&result.summary, &report_path)?;

    info!(output = %output_dir.display(), "wrote run artifacts");
    Ok(vec![csv_path, json_path, report_path])
}
