//! Log output: stderr plus a daily-rolling file in the data directory.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "miruro.log";

/// `RUST_LOG` wins when set; otherwise `miruro=info`, or `miruro=debug`
/// with `--verbose`.
pub fn filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "miruro=debug" } else { "miruro=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output gets flushed.
pub fn init(verbose: bool, log_dir: &Path) -> Option<WorkerGuard> {
    let stderr = fmt::layer().with_writer(std::io::stderr);

    // The file layer is optional: an unwritable data dir still leaves stderr.
    let (file, guard) = match std::fs::create_dir_all(log_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        Err(e) => {
            eprintln!("miruro: not writing log files to {}: {e}", log_dir.display());
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(stderr)
        .with(file)
        .init();

    guard
}
