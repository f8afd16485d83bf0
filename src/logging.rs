// src/logging.rs

use log::{LevelFilter, SetLoggerError};
use std::io::Write;
use std::sync::Once;

/// Initialize the logging system with the specified log level
pub fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(level)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "[{}] {} - {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.args()
                )
            })
            .init();
    });

    Ok(())
}

/// Log level for different components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a CLI-style level name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

/// Subsystem logging macros
#[macro_export]
macro_rules! producer_log {
    ($level:expr, $($arg:tt)*) => {{
        match $level {
            LogLevel::Trace => log::trace!("[PRODUCER] {}", format_args!($($arg)*)),
            LogLevel::Debug => log::debug!("[PRODUCER] {}", format_args!($($arg)*)),
            LogLevel::Info => log::info!("[PRODUCER] {}", format_args!($($arg)*)),
            LogLevel::Warn => log::warn!("[PRODUCER] {}", format_args!($($arg)*)),
            LogLevel::Error => log::error!("[PRODUCER] {}", format_args!($($arg)*)),
        }
    }};
}

#[macro_export]
macro_rules! collector_log {
    ($level:expr, $($arg:tt)*) => {{
        match $level {
            LogLevel::Trace => log::trace!("[COLLECTOR] {}", format_args!($($arg)*)),
            LogLevel::Debug => log::debug!("[COLLECTOR] {}", format_args!($($arg)*)),
            LogLevel::Info => log::info!("[COLLECTOR] {}", format_args!($($arg)*)),
            LogLevel::Warn => log::warn!("[COLLECTOR] {}", format_args!($($arg)*)),
            LogLevel::Error => log::error!("[COLLECTOR] {}", format_args!($($arg)*)),
        }
    }};
}

#[macro_export]
macro_rules! api_log {
    ($level:expr, $($arg:tt)*) => {{
        match $level {
            LogLevel::Trace => log::trace!("[API] {}", format_args!($($arg)*)),
            LogLevel::Debug => log::debug!("[API] {}", format_args!($($arg)*)),
            LogLevel::Info => log::info!("[API] {}", format_args!($($arg)*)),
            LogLevel::Warn => log::warn!("[API] {}", format_args!($($arg)*)),
            LogLevel::Error => log::error!("[API] {}", format_args!($($arg)*)),
        }
    }};
}
