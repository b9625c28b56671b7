//! Logging functionality for MediSage
//!
//! Configures a `tracing` subscriber for applications embedding the library.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that overrides the level passed to [`init_logging`].
pub const LOG_ENV_VAR: &str = "MEDISAGE_LOG";

/// Log levels supported by MediSage.
///
/// These map to the tracing level hierarchy: ERROR, WARN, INFO, DEBUG, TRACE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }

    /// Default filter directive for this level, scoped to the crate
    pub fn directive(self) -> String {
        format!("medisage={}", self.to_tracing_level())
    }
}

/// Initialize logging for MediSage with a specific log level.
///
/// Call once at application start. `MEDISAGE_LOG`, when set, takes
/// precedence over `level`:
///
/// ```bash
/// MEDISAGE_LOG=medisage=debug cargo run --example symptom_checker
/// ```
///
/// ```no_run
/// use medisage::logging::{init_logging, LogLevel};
///
/// init_logging(LogLevel::Info);
/// tracing::info!("Application starting");
/// ```
pub fn init_logging(level: LogLevel) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("MediSage logging initialized at level: {:?}", level);
}

/// Initialize logging with custom environment filter
///
/// ```no_run
/// use medisage::logging::init_logging_with_filter;
///
/// init_logging_with_filter("medisage=info,medisage::backend=trace");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        eprintln!("Invalid log filter {:?}, using medisage=info", filter);
        EnvFilter::new(LogLevel::Info.directive())
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("MediSage logging initialized with custom filter: {}", filter);
}
