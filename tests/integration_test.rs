use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use tempfile::tempdir;

use sentistream::pipeline::ingest::RejectReason;
use sentistream::pipeline::sentiment::Sentiment;
use sentistream::{report, sample, PipelineError, PipelineRunner, RunConfig};

fn write_jsonl(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {} to be close to {}",
        actual,
        expected
    );
}

#[test]
fn test_batch_run_scores_labels_and_screens() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_jsonl(
        temp_dir.path(),
        "feedback.jsonl",
        &[
            r#"{"id": "fb-1", "text": "I love this!!!"}"#,
            r#"{"id": "fb-2", "text": "I don't like it"}"#,
            r#"{"id": "fb-3", "text": "The delivery arrived on schedule"}"#,
            r#"{"id": "fb-4"}"#,
            r#"{"id": "fb-5", "text": "   "}"#,
        ],
    );

    let runner = PipelineRunner::new();
    let result = runner.run(&RunConfig::batch(&input))?;

    // Three lines score, two are screened out
    assert_eq!(result.records.len(), 3);
    assert_eq!(result.rejected.len(), 2);

    let labels: Vec<Sentiment> = result.records.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
    );

    // Line numbers are physical positions in the input file
    let lines: Vec<usize> = result.records.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert_eq!(result.rejected[0].line, 4);
    assert_eq!(result.rejected[0].reason, RejectReason::MissingField);
    assert_eq!(result.rejected[1].line, 5);
    assert_eq!(result.rejected[1].reason, RejectReason::EmptyText);

    let summary = &result.summary;
    assert_eq!(summary.total_records, 3);
    assert_eq!(summary.rejected_records, 2);
    assert_eq!(summary.positive, 1);
    assert_eq!(summary.negative, 1);
    assert_eq!(summary.neutral, 1);

    Ok(())
}

#[test]
fn test_known_phrases_score_to_published_compounds() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_jsonl(
        temp_dir.path(),
        "phrases.jsonl",
        &[
            r#"{"text": "good"}"#,
            r#"{"text": "not good"}"#,
            r#"{"text": "very good"}"#,
            r#"{"text": "I don't like it"}"#,
        ],
    );

    let runner = PipelineRunner::new();
    let result = runner.run(&RunConfig::batch(&input))?;
    assert_eq!(result.records.len(), 4);

    assert_close(result.records[0].scores.compound, 0.4404);
    assert_close(result.records[1].scores.compound, -0.3412);
    assert_close(result.records[2].scores.compound, 0.4927);
    assert_close(result.records[3].scores.compound, -0.2755);

    assert_eq!(result.records[0].label, Sentiment::Positive);
    assert_eq!(result.records[1].label, Sentiment::Negative);
    assert_eq!(result.records[2].label, Sentiment::Positive);
    assert_eq!(result.records[3].label, Sentiment::Negative);

    Ok(())
}

#[test]
fn test_validate_tallies_reject_reasons_without_scoring() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_jsonl(
        temp_dir.path(),
        "dirty.jsonl",
        &[
            "this line is not json",
            r#"{"id": "fb-2"}"#,
            r#"{"id": "fb-3", "text": ""}"#,
            r#"{"id": "fb-4", "text": "works great"}"#,
        ],
    );

    let runner = PipelineRunner::new();
    let report = runner.validate(&RunConfig::batch(&input))?;

    assert_eq!(report.total, 4);
    assert_eq!(report.valid, 1);
    assert_eq!(report.rejected.len(), 3);

    let reasons: Vec<RejectReason> = report.rejected.iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![
            RejectReason::ParseError,
            RejectReason::MissingField,
            RejectReason::EmptyText
        ]
    );

    Ok(())
}

#[test]
fn test_run_with_nothing_scorable_still_summarises() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_jsonl(
        temp_dir.path(),
        "unusable.jsonl",
        &["not json at all", r#"{"id": "fb-2"}"#, r#"{"text": " "}"#],
    );

    let runner = PipelineRunner::new();
    let result = runner.run(&RunConfig::batch(&input))?;

    assert!(result.records.is_empty());
    assert_eq!(result.rejected.len(), 3);
    assert_eq!(result.summary.total_records, 0);
    assert_eq!(result.summary.rejected_records, 3);
    assert_eq!(result.summary.mean_compound, 0.0);
    assert!(result.summary.min_compound.is_none());
    assert!(result.summary.max_compound.is_none());

    Ok(())
}

#[test]
fn test_stream_mode_covers_every_record_in_order() -> Result<()> {
    let temp_dir = tempdir()?;
    let lines: Vec<String> = (1..=25)
        .map(|i| format!(r#"{{"id": "r-{:02}", "text": "good"}}"#, i))
        .collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let input = write_jsonl(temp_dir.path(), "stream.jsonl", &line_refs);

    let runner = PipelineRunner::new();
    let config = RunConfig::stream(&input, 10, Duration::ZERO);
    let result = runner.run(&config)?;

    // 25 records over chunks of 10 still means 25 scored records
    assert_eq!(result.records.len(), 25);
    let ids: Vec<&str> = result
        .records
        .iter()
        .map(|r| r.id.as_deref().unwrap())
        .collect();
    let expected: Vec<String> = (1..=25).map(|i| format!("r-{:02}", i)).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());

    Ok(())
}

#[test]
fn test_stream_and_batch_produce_identical_results() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_jsonl(
        temp_dir.path(),
        "both_modes.jsonl",
        &[
            r#"{"id": "fb-1", "text": "This is absolutely wonderful"}"#,
            r#"{"id": "fb-2", "text": "worst purchase ever"}"#,
            "broken line",
            r#"{"id": "fb-4", "text": "It was fine, nothing special"}"#,
            r#"{"id": "fb-5", "text": "not bad at all"}"#,
        ],
    );

    let runner = PipelineRunner::new();
    let batch = runner.run(&RunConfig::batch(&input))?;
    let stream = runner.run(&RunConfig::stream(&input, 2, Duration::ZERO))?;

    assert_eq!(batch.records, stream.records);
    assert_eq!(batch.rejected, stream.rejected);
    assert_eq!(batch.summary, stream.summary);

    Ok(())
}

#[test]
fn test_max_records_caps_both_run_and_validate() -> Result<()> {
    let temp_dir = tempdir()?;
    let lines: Vec<String> = (1..=25)
        .map(|i| format!(r#"{{"id": "r-{:02}", "text": "good"}}"#, i))
        .collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let input = write_jsonl(temp_dir.path(), "capped.jsonl", &line_refs);

    let runner = PipelineRunner::new();

    let result = runner.run(&RunConfig::batch(&input).with_max_records(Some(10)))?;
    assert_eq!(result.records.len() + result.rejected.len(), 10);
    assert_eq!(result.records.last().unwrap().id.as_deref(), Some("r-10"));

    let report = runner.validate(&RunConfig::batch(&input).with_max_records(Some(10)))?;
    assert_eq!(report.total, 10);

    Ok(())
}

#[test]
fn test_missing_input_file_is_a_fatal_error() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("does_not_exist.jsonl");

    let runner = PipelineRunner::new();
    let err = runner.run(&RunConfig::batch(&input)).unwrap_err();

    assert!(matches!(err, PipelineError::InputOpen { .. }));
    assert!(err.to_string().contains("does_not_exist.jsonl"));
}

#[test]
fn test_directory_input_is_a_fatal_error() {
    let temp_dir = tempdir().unwrap();

    let runner = PipelineRunner::new();
    let err = runner.run(&RunConfig::batch(temp_dir.path())).unwrap_err();

    assert!(matches!(err, PipelineError::InputOpen { .. }));
    assert!(err.to_string().contains("not a regular file"));
}

#[test]
fn test_artifacts_are_written_and_parse_back() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = write_jsonl(
        temp_dir.path(),
        "feedback.jsonl",
        &[
            r#"{"id": "fb-1", "text": "I love this!!!"}"#,
            r#"{"id": "fb-2", "text": "I don't like it"}"#,
            r#"{"id": "fb-3", "text": "The delivery arrived on schedule"}"#,
        ],
    );

    let runner = PipelineRunner::new();
    let result = runner.run(&RunConfig::batch(&input))?;

    let out_dir = temp_dir.path().join("out");
    let artifacts = report::write_all(&result, &out_dir)?;
    assert_eq!(artifacts.len(), 3);

    // CSV: header plus one row per scored record
    let csv = fs::read_to_string(out_dir.join(report::RESULTS_CSV))?;
    let mut csv_lines = csv.lines();
    assert_eq!(
        csv_lines.next(),
        Some("line,id,timestamp,text,neg,neu,pos,compound,label")
    );
    assert_eq!(csv_lines.count(), result.records.len());

    // Full run JSON parses back and carries the summary
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join(report::RUN_JSON))?)?;
    assert!(json["run_id"].is_string());
    assert_eq!(json["summary"]["total_records"], 3);
    assert_eq!(json["records"].as_array().unwrap().len(), 3);

    // Human-readable summary
    let text = fs::read_to_string(out_dir.join(report::SUMMARY_REPORT))?;
    assert!(text.contains("Sentiment Analysis Summary Report"));
    assert!(text.contains("Total messages analysed: 3"));

    Ok(())
}

#[test]
fn test_generated_sample_flows_through_the_pipeline() -> Result<()> {
    let temp_dir = tempdir()?;
    let input = temp_dir.path().join("data").join("sample.jsonl");

    let written = sample::generate_sample(&input, 50, Some(7))?;
    assert_eq!(written, 50);

    let runner = PipelineRunner::new();
    let result = runner.run(&RunConfig::batch(&input))?;

    // Lines 25 and 50 are defective by construction
    assert_eq!(result.records.len() + result.rejected.len(), 50);
    assert_eq!(result.rejected.len(), 2);
    assert_eq!(result.summary.total_records, 48);
    assert_eq!(result.summary.rejected_records, 2);

    Ok(())
}
