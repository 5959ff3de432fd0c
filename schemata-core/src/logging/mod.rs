//! Logging for Schemata
//!
//! Library code logs through the standard `log` macros. Binaries call
//! [`init_logging`] once at startup to route records to stderr through
//! `env_logger`, rendered in the configured [`LogFormat`]. `RUST_LOG`, when
//! set, overrides the configured level.
//!
//! # Example
//!
//! ```rust,no_run
//! use schemata_core::logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
//!
//! let config = LoggingConfig::default().with_level(LogLevel::Info).with_format(LogFormat::Json);
//! init_logging(&config).unwrap();
//!
//! log::info!("Loaded {} models", 3);
//! ```

pub mod config;
pub mod formatter;

pub use config::{LogLevel, LoggingConfig};
pub use formatter::{LogEntry, LogFormat};

use std::io::Write;
use std::sync::Once;

static INIT: Once = Once::new();

/// Install the global logger. Later calls are no-ops.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let mut result = Ok(());
    INIT.call_once(|| {
        result = build_logger(config).try_init().map_err(anyhow::Error::from);
    });
    result
}

fn build_logger(config: &LoggingConfig) -> env_logger::Builder {
    let format = config.format;
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.level.into())
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stderr)
        .format(move |buf, record| {
            writeln!(buf, "{}", format.format_entry(&LogEntry::from_record(record)))
        });
    builder
}
