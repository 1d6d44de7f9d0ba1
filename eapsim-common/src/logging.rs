//! Logging infrastructure for eapsim
//!
//! Configurable logging on top of the `tracing` crate, plus helpers for
//! logging SIM command exchanges without dumping key material above the
//! `trace` level.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level - most verbose, includes raw SIM material
    Trace,
    /// Debug level
    Debug,
    /// Info level (default)
    #[default]
    Info,
    /// Warn level
    Warn,
    /// Error level - least verbose
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

/// Initialize the tracing subscriber with the specified log level.
///
/// The level can be overridden by the `RUST_LOG` environment variable.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_logging(level: LogLevel) {
    init_logging_with_filter(&level.to_string());
}

/// Initialize logging with a custom filter string.
///
/// # Example
///
/// ```
/// use eapsim_common::logging::init_logging_with_filter;
///
/// // Default to info, but show decoder details
/// init_logging_with_filter("info,eapsim_usim=debug");
/// ```
pub fn init_logging_with_filter(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .try_init();
}

/// Direction of a SIM command exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Challenge sent to the SIM
    ToSim,
    /// Response received from the SIM
    FromSim,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ToSim => write!(f, "TO-SIM"),
            Direction::FromSim => write!(f, "FROM-SIM"),
        }
    }
}

/// Log a SIM command exchange.
///
/// The length is logged at debug level, the payload itself only at trace.
pub fn log_sim_exchange(direction: Direction, kind: &str, data: &[u8]) {
    tracing::debug!(
        direction = %direction,
        kind = kind,
        len = data.len(),
        "{} {} payload",
        direction,
        kind
    );
    tracing::trace!(direction = %direction, hex = %HexDump(data), "{} raw", kind);
}

/// Wrapper for hex dump formatting
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
