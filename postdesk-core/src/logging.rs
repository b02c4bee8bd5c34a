//! Logging System for Postdesk.
//!
//! Built upon the `tracing` ecosystem. Supports console output and optional
//! daily-rolling file logging, each in text or JSON format.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Keeps the file writer's guard alive for the lifetime of the process so
/// buffered log lines are flushed on exit.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup, directing messages to `stderr`.
///
/// Intended for tests, early startup before configuration is loaded, or as a
/// fallback when configuration fails. Honors `RUST_LOG`, defaulting to "info".
/// Errors (e.g. a global subscriber is already set) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Parses a configured level name into the filter directive it stands for.
pub fn level_directive(level: &str) -> Result<String, LoggingError> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE.to_string()),
        "debug" => Ok(Level::DEBUG.to_string()),
        "info" => Ok(Level::INFO.to_string()),
        "warn" => Ok(Level::WARN.to_string()),
        "error" => Ok(Level::ERROR.to_string()),
        invalid => Err(LoggingError::FilterError(format!("Invalid log level in config: {}", invalid))),
    }
}

fn create_file_layer(log_path: &Path, format: &str) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    utils::fs::ensure_dir_exists(directory)?;

    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("postdesk.log"));
    let file_appender = tracing_appender::rolling::daily(directory, file_name);
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: BoxedLayer = match format {
        "json" => Box::new(fmt::layer().json().with_writer(non_blocking_writer).with_ansi(false)),
        _ => Box::new(fmt::layer().with_writer(non_blocking_writer).with_ansi(false)),
    };
    Ok((layer, guard))
}

fn store_guard(guard: Option<WorkerGuard>) {
    match LOG_WORKER_GUARD.lock() {
        Ok(mut slot) => *slot = guard,
        Err(e) => eprintln!("[ERROR] Failed to lock LOG_WORKER_GUARD: {}. Log flushing may be affected.", e),
    }
}

/// Initializes the global logging system from a [`LoggingConfig`].
///
/// Sets a console layer plus, when `file_path` is configured, a file layer.
///
/// # Errors
///
/// Returns `CoreError::LoggingInitialization` if the level is invalid, or if
/// setting the global subscriber fails and `is_reload` is `false`.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let directive = level_directive(&config.level)?;
    let format = config.format.to_lowercase();

    let stdout_filter = EnvFilter::new(directive.clone());
    let stdout_layer: BoxedLayer = match format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_ansi(false)
            .with_filter(stdout_filter)
            .boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(stdout_filter)
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer];
    let mut new_file_guard = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &format)?;
        layers.push(file_layer.with_filter(EnvFilter::new(directive)).boxed());
        new_file_guard = Some(guard);
    }

    let result = Registry::default().with(layers).try_init();

    // The running subscriber keeps writing through the old guard's worker.
    if result.is_ok() {
        store_guard(new_file_guard);
    }

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            tracing::info!("Logging re-initialization skipped, a subscriber is already set: {}", e);
            Ok(())
        }
        Err(e) => Err(CoreError::LoggingInitialization(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        ))),
    }
}
