//! Tracing subscriber setup.

use std::path::Path;

use odonto_core::{OdontoError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `level`. Console output goes to stderr; when
/// `logs_dir` is given a daily rolling `odonto.log` is written there too.
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(level: &str, logs_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| OdontoError::config(format!("Invalid log level '{}': {}", level, e)))?;

    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "odonto.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| OdontoError::internal(format!("Failed to install logger: {}", e)))?;

    Ok(guard)
}
