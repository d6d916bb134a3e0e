//! Subscriber setup for host binaries.
//!
//! The library itself only emits `tracing` events; nothing is printed until a
//! host installs a subscriber, typically with [`init`].

use std::fs::File;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::LoggingConfig;

static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file {0}: {1}")]
    LogFile(String, #[source] std::io::Error),

    #[error("a global subscriber is already installed")]
    AlreadyInstalled,
}

/// Install a stderr layer and, with `cfg.file` set, a non-blocking file layer.
///
/// `RUST_LOG` directives override the configured levels.
pub fn init(cfg: &LoggingConfig) -> Result<(), LoggingError> {
    let stderr_level = parse_level(&cfg.level).unwrap_or(LevelFilter::INFO);

    let stderr_filter =
        EnvFilter::builder().with_default_directive(stderr_level.into()).from_env_lossy();

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_filter(stderr_filter);

    let registry = tracing_subscriber::registry().with(stderr_layer);

    if let Some(ref path) = cfg.file {
        let file_level_str = cfg.file_level.as_deref().unwrap_or(&cfg.level);
        let file_level = parse_level(file_level_str).unwrap_or(LevelFilter::DEBUG);

        let file_filter =
            EnvFilter::builder().with_default_directive(file_level.into()).from_env_lossy();

        let file = File::create(path)
            .map_err(|e| LoggingError::LogFile(path.display().to_string(), e))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        // keeps the writer thread alive for the life of the process
        if let Ok(mut g) = LOG_GUARD.lock() {
            *g = Some(guard);
        }

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(file_filter);

        registry.with(file_layer).try_init().map_err(|_| LoggingError::AlreadyInstalled)
    } else {
        registry.try_init().map_err(|_| LoggingError::AlreadyInstalled)
    }
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        "off" => Some(LevelFilter::OFF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("off"), Some(LevelFilter::OFF));
        assert_eq!(parse_level("invalid"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn unwritable_log_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let cfg = LoggingConfig {
            file: Some(tmp.path().join("missing/dir/mdshelf.log")),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&cfg), Err(LoggingError::LogFile(..))));
    }
}
