//! Tracing subscriber setup.
//!
//! Console events go to stderr so anonymized output piped from stdout
//! stays clean. When file logging is enabled, the same events are also
//! written as JSON lines to a rotating `cloak.log`.

use crate::config::LoggingSettings;
use crate::domain::{CloakError, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the non-blocking file writer alive. Dropping the guard flushes
/// buffered events, so `main` holds it until exit.
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// `level` applies to the crate's own targets; `RUST_LOG` overrides it
/// when set. Returns the guard the caller must keep alive.
///
/// ```no_run
/// use cloak::config::LoggingSettings;
/// use cloak::logging::init_logging;
///
/// let settings = LoggingSettings::default();
/// let _guard = init_logging("info", &settings).expect("Failed to initialize logging");
/// ```
pub fn init_logging(level: &str, settings: &LoggingSettings) -> Result<LoggingGuard> {
    let level = parse_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cloak={level}")));

    let (file_layer, file_guard) = if settings.local_enabled {
        std::fs::create_dir_all(&settings.local_path).map_err(|e| {
            CloakError::Configuration(format!(
                "Failed to create log directory {}: {}",
                settings.local_path, e
            ))
        })?;
        let appender =
            RollingFileAppender::new(rotation_of(settings), &settings.local_path, "cloak.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!(
        level = %level,
        file_logging = settings.local_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard { _file: file_guard })
}

fn rotation_of(settings: &LoggingSettings) -> Rotation {
    match settings.local_rotation.as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(CloakError::Configuration(format!(
            "Invalid log level: {other}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
