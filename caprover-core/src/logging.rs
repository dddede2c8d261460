//! Structured logging setup using the `tracing` ecosystem.
//!
//! The client crates only emit events; installing a subscriber is left to the
//! host program, which can use one of the helpers below.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;
use crate::error::{CaproverError, CaproverResult};

/// Base name of the daily-rotated log file.
pub const LOG_FILE_NAME: &str = "caprover-client.log";

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

impl LogGuard {
    /// Whether log events are also written to a file.
    pub fn writes_file(&self) -> bool {
        self._guard.is_some()
    }
}

/// Install the global subscriber described by `config`.
///
/// Console output is always on. A non-empty `directory` adds a daily-rotated
/// file in that directory, formatted as JSON when `json_output` is set.
/// Fails with `Config` if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> CaproverResult<LogGuard> {
    let (file_layer, guard) = match file_writer(config)? {
        Some((writer, guard)) => (Some(build_file_layer(writer, config.json_output)), Some(guard)),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter(&config.level))
        .with(fmt::layer().with_target(true).compact())
        .try_init()
        .map_err(|e| CaproverError::Config(format!("failed to install log subscriber: {e}")))?;

    tracing::info!(
        level = %config.level,
        directory = %config.directory,
        json = config.json_output,
        "logging initialized"
    );

    Ok(LogGuard { _guard: guard })
}

/// Initialize a minimal console-only logger for tests or small programs.
///
/// Does nothing if a subscriber is already installed.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_target(true).compact())
        .try_init();
}

/// Parse a level or filter directive, falling back to `info`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn build_file_layer(writer: NonBlocking, json: bool) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);
    if json {
        layer.json().boxed()
    } else {
        layer.boxed()
    }
}

/// Open the rolling file writer, if a log directory is configured.
fn file_writer(config: &LoggingConfig) -> CaproverResult<Option<(NonBlocking, WorkerGuard)>> {
    if config.directory.is_empty() {
        return Ok(None);
    }
    let dir = Path::new(&config.directory);
    std::fs::create_dir_all(dir)?;
    Ok(Some(tracing_appender::non_blocking(rolling::daily(
        dir,
        LOG_FILE_NAME,
    ))))
}
