//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level at runtime
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - The filter sits behind a reload layer so configuration changes can
//!   adjust verbosity without reinstalling the subscriber

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;

/// Error raised while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
    #[error("failed to swap log filter: {0}")]
    Reload(#[from] reload::Error),
    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Receiver of observability settings derived from the dynamic configuration.
///
/// The reloader only talks to this trait, never to the global subscriber.
pub trait ObservabilitySettings: Send + Sync {
    /// Apply a log level by name (e.g. `INFO`, `debug`, `OFF`).
    fn apply_log_level(&self, level: &str) -> Result<(), LoggingError>;
}

/// Settings sink that accepts everything and changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSettings;

impl ObservabilitySettings for NoopSettings {
    fn apply_log_level(&self, level: &str) -> Result<(), LoggingError> {
        parse_level(level).map(|_| ())
    }
}

/// Map a log level name to a filter.
///
/// Accepts tracing names as well as the usual Log4j-style names
/// (`ALL`, `FATAL`, `OFF`), case-insensitively.
pub fn parse_level(name: &str) -> Result<LevelFilter, LoggingError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "all" | "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "fatal" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(LoggingError::UnknownLevel(name.to_string())),
    }
}

/// Live handle on the installed subscriber's filter.
#[derive(Debug, Clone)]
pub struct TracingSettings {
    handle: reload::Handle<EnvFilter, Registry>,
}

impl ObservabilitySettings for TracingSettings {
    fn apply_log_level(&self, level: &str) -> Result<(), LoggingError> {
        let filter = parse_level(level)?;
        self.handle
            .reload(EnvFilter::new(filter.to_string().to_ascii_lowercase()))?;
        Ok(())
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level at startup.
pub fn init_logging(config: &ObservabilityConfig) -> Result<TracingSettings, LoggingError> {
    let level = parse_level(&config.log_level)?;
    let initial = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_ascii_lowercase()));

    let (filter, handle) = reload::Layer::new(initial);
    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }

    Ok(TracingSettings { handle })
}
