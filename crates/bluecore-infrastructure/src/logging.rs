//! Structured logging with tracing
//!
//! Every lifecycle transition in the module stack is emitted through
//! `tracing` with a `module` field. This module installs the subscriber.

use crate::constants::{DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};
use bluecore_domain::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;

/// Initialize the global subscriber
///
/// Console output goes to stderr; stdout is left to command output.
/// `BLUECORE_LOG` overrides the configured level with a full `EnvFilter`
/// directive. Fails if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config
        .file_output
        .as_ref()
        .map(|path| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(
                    path.file_stem()
                        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE_STEM))
                        .to_string_lossy(),
                )
                .max_log_files(config.max_files)
                .build(path.parent().unwrap_or_else(|| Path::new(".")))
                .map_err(|e| {
                    Error::configuration_with_source(
                        format!("Cannot open log file {}", path.display()),
                        e,
                    )
                })
        })
        .transpose()?;

    // Layer types differ per format, hence the four branches
    let registry = Registry::default().with(filter);
    let installed = if config.json_format {
        let console = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true);
        match file_appender {
            Some(appender) => {
                let file = fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_thread_names(true);
                registry.with(console).with(file).try_init()
            }
            None => registry.with(console).try_init(),
        }
    } else {
        let console = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true);
        match file_appender {
            Some(appender) => {
                let file = fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_thread_names(true);
                registry.with(console).with(file).try_init()
            }
            None => registry.with(console).try_init(),
        }
    };
    installed.map_err(|e| Error::configuration_with_source("Logging already initialized", e))?;

    info!(%level, json = config.json_format, "Logging initialized");
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, found: bool) {
    if found {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found, using defaults");
    }
}
