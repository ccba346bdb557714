//! Application logging functionality
//!
//! Installs the tracing subscriber and handles log file management

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::core::config_file::ConfigFile;

/// Filter used when nothing else is configured
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Name of today's log file inside the logs directory
fn log_file_name() -> String {
    let timestamp = chrono::Local::now().format("%Y-%m-%d");
    format!("glyphsmith-{}.log", timestamp)
}

/// Build the log filter
///
/// Priority order:
/// 1. RUST_LOG environment variable
/// 2. `level` (from --log-level or the settings file)
/// 3. Built-in default (warn)
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match level.map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        Some(Err(e)) => {
            eprintln!("Ignoring invalid log level: {e}");
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        }
        None => EnvFilter::new(DEFAULT_LOG_LEVEL),
    }
}

/// Install the global subscriber
///
/// With `to_file`, logs go to ~/.config/glyphsmith/logs/ instead of stderr.
/// The returned guard flushes the file writer and must be held until exit.
pub fn init(level: Option<&str>, to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(level);

    if to_file {
        let logs_dir = ConfigFile::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        let appender = tracing_appender::rolling::never(&logs_dir, log_file_name());
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .with(filter)
            .try_init()?;
        return Ok(Some(guard));
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()?;
    Ok(None)
}
