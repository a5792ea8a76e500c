//! Application logging functionality
//!
//! Installs the tracing subscriber and handles log file placement.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Get the path to the pixelstroke config directory
fn config_dir() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
    config_dir.join("pixelstroke")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y-%m-%d");
    logs_dir().join(format!("pixelstroke-{timestamp}.log"))
}

/// Filter directives for a `-v` count. Quieter in release builds.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 if cfg!(debug_assertions) => "pixelstroke=info,norad=warn",
        0 => "pixelstroke=warn,norad=error",
        1 => "pixelstroke=info,norad=warn",
        2 => "pixelstroke=debug,norad=info",
        _ => "pixelstroke=trace,norad=debug",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity`. With a `log_file` every
/// event is also written there; keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let Some(path) = log_file else {
        builder
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
        return Ok(None);
    };

    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory {}", directory.display()))?;
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?;
    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    builder
        .with_ansi(false)
        .with_writer(std::io::stderr.and(writer))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))?;
    tracing::debug!("Logging to {}", path.display());
    Ok(Some(guard))
}
