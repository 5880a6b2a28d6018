use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::error;

use sentistream::config::FileConfig;
use sentistream::pipeline::ingest::RejectReason;
use sentistream::pipeline::sentiment::Sentiment;
use sentistream::{logging, report, sample, PipelineRunner, RunConfig};

#[derive(Parser)]
#[command(name = "sentistream")]
#[command(about = "Lexicon-based sentiment analysis for customer feedback streams")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a feedback dataset and write result artifacts
    Run {
        /// Input file of line-delimited JSON feedback records
        #[arg(short, long)]
        input: PathBuf,
        /// Directory for result artifacts (default: output)
        #[arg(short, long)]
        outdir: Option<PathBuf>,
        /// Directory for log files (default: logs)
        #[arg(long)]
        logdir: Option<PathBuf>,
        /// Replay the input as a delayed chunk stream instead of one batch
        #[arg(long)]
        simulate: bool,
        /// Records per simulated chunk
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Pause between simulated chunks, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
        /// Stop reading after this many records
        #[arg(long)]
        max: Option<usize>,
        /// TOML config file (default: ./config.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Log debug detail to the console
        #[arg(short, long)]
        verbose: bool,
    },
    /// Screen a dataset and report what would be rejected, without scoring
    Validate {
        /// Input file of line-delimited JSON feedback records
        #[arg(short, long)]
        input: PathBuf,
        /// Stop reading after this many records
        #[arg(long)]
        max: Option<usize>,
        /// Log debug detail to the console
        #[arg(short, long)]
        verbose: bool,
    },
    /// Generate a synthetic feedback dataset for testing the pipeline
    Generate {
        /// Where to write the dataset
        #[arg(short, long, default_value = "data/sample_stream.jsonl")]
        output: PathBuf,
        /// Number of lines to generate
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn load_file_config(path: Option<&Path>) -> anyhow::Result<FileConfig> {
    match path {
        Some(path) => Ok(FileConfig::load(path)?),
        None => {
            let default_path = Path::new("config.toml");
            if default_path.exists() {
                Ok(FileConfig::load(default_path)?)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            outdir,
            logdir,
            simulate,
            chunk_size,
            delay_ms,
            max,
            config,
            verbose,
        } => {
            // CLI flags win over config file values, which win over built-in defaults
            let file_config = load_file_config(config.as_deref())?;
            let outdir = outdir.unwrap_or_else(|| file_config.output.results_dir.clone());
            let logdir = logdir.unwrap_or_else(|| file_config.output.log_dir.clone());
            let chunk_size = chunk_size.unwrap_or(file_config.pipeline.chunk_size);
            let delay_ms = delay_ms.unwrap_or(file_config.pipeline.delay_ms);
            let max = max.or(file_config.pipeline.max_records);

            logging::init_logging(&logdir, verbose);

            let run_config = if simulate {
                println!(
                    "🚀 Replaying {} as a stream (chunks of {}, {}ms apart)...",
                    input.display(),
                    chunk_size,
                    delay_ms
                );
                RunConfig::stream(input, chunk_size, Duration::from_millis(delay_ms))
            } else {
                println!("🚀 Scoring {} in one batch...", input.display());
                RunConfig::batch(input)
            }
            .with_max_records(max);

            let runner = PipelineRunner::new();
            let result = match runner.run(&run_config) {
                Ok(result) => result,
                Err(e) => {
                    error!("Pipeline run failed: {}", e);
                    eprintln!("❌ Pipeline run failed: {}", e);
                    std::process::exit(1);
                }
            };

            let artifacts = report::write_all(&result, &outdir)?;
            let summary = &result.summary;

            println!("\n📊 Run {} ({} mode):", result.run_id, result.mode);
            println!("   Records scored: {}", summary.total_records);
            println!("   Lines rejected: {}", summary.rejected_records);
            println!(
                "   Positive: {} ({:.2}%)",
                summary.positive,
                summary.label_percentage(Sentiment::Positive)
            );
            println!(
                "   Negative: {} ({:.2}%)",
                summary.negative,
                summary.label_percentage(Sentiment::Negative)
            );
            println!(
                "   Neutral: {} ({:.2}%)",
                summary.neutral,
                summary.label_percentage(Sentiment::Neutral)
            );
            println!("   Mean compound: {:.4}", summary.mean_compound);

            println!("\n💾 Artifacts:");
            for path in &artifacts {
                println!("   - {}", path.display());
            }
        }
        Commands::Validate {
            input,
            max,
            verbose,
        } => {
            logging::init_logging(Path::new("logs"), verbose);

            println!("🔍 Screening {}...", input.display());
            let run_config = RunConfig::batch(input).with_max_records(max);
            let runner = PipelineRunner::new();
            let report = match runner.validate(&run_config) {
                Ok(report) => report,
                Err(e) => {
                    error!("Validation failed: {}", e);
                    eprintln!("❌ Validation failed: {}", e);
                    std::process::exit(1);
                }
            };

            println!("\n📊 Validation results:");
            println!("   Lines inspected: {}", report.total);
            println!("   Valid records: {}", report.valid);
            println!("   Rejected: {}", report.rejected.len());

            if !report.rejected.is_empty() {
                println!("\n⚠️  Rejections by reason:");
                for reason in [
                    RejectReason::ParseError,
                    RejectReason::MissingField,
                    RejectReason::EmptyText,
                ] {
                    let count = report
                        .rejected
                        .iter()
                        .filter(|record| record.reason == reason)
                        .count();
                    if count > 0 {
                        println!("   {}: {}", reason, count);
                    }
                }
                for record in &report.rejected {
                    println!("   - line {}: {}", record.line, record.reason);
                }
            }
        }
        Commands::Generate {
            output,
            count,
            seed,
        } => {
            let written = sample::generate_sample(&output, count, seed)?;
            println!("✅ Wrote {} lines to {}", written, output.display());
        }
    }
    Ok(())
}
