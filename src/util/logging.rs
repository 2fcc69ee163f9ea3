//! Structured logging setup for packmorph
//!
//! Initialization and configuration for structured logging using the
//! `tracing` ecosystem. Logs go to stderr so CI outputs on stdout stay
//! machine-parseable. Initialization is guarded by a `Once`, so library
//! consumers and the CLI can both call it safely.
//!
//! # Example
//!
//! ```no_run
//! use packmorph::util::logging;
//!
//! logging::init_default();
//!
//! use tracing::info;
//! info!("Pipeline started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format (for structured logging in CI log collectors)
    pub use_json: bool,

    /// Include the module target (e.g., packmorph::pipeline) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the specified level
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level from a string, defaulting to INFO on unknown input
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes the logging system with the provided configuration
///
/// Sets up the `tracing` subscriber writing to stderr. Can only be called
/// once; subsequent calls are ignored. `RUST_LOG` takes precedence over the
/// configured level when set.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter.add_directive(
                format!("packmorph={}", config.level)
                    .parse()
                    .expect("valid level directive"),
            );
        }

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Initializes logging with default configuration
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from the `PACKMORPH_LOG_LEVEL` environment variable
pub fn init_from_env() {
    let level = env::var("PACKMORPH_LOG_LEVEL")
        .map(|s| parse_level(&s))
        .unwrap_or(Level::INFO);
    init_logging(LoggingConfig::with_level(level));
}
