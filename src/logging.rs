use std::fs;
use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
///
/// Console output stays human-readable; the file layer writes JSON lines to a
/// daily-rotated file under `log_dir`. Setting `RUST_LOG` overrides the
/// default level, including the `--verbose` switch.
pub fn init_logging(log_dir: &Path, verbose: bool) {
    let _ = fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, "sentistream.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    let default_directive = if verbose {
        "sentistream=debug"
    } else {
        "sentistream=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    // Dropping the guard stops the background writer; leak it so buffered
    // log lines survive until process exit.
    std::mem::forget(_guard);
}
