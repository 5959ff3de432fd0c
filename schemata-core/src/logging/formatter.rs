//! Log formatting options for different output styles

use crate::logging::LogLevel;
use chrono::{DateTime, Utc};

/// How logs should be formatted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON, one object per line
    /// Example: {"timestamp":"2024-01-15T10:30:00Z","level":"INFO","target":"schemata_core::registry","message":"Registered model Book"}
    Json,

    /// Human-readable format (default)
    /// Example: 2024-01-15 10:30:00.000 INFO  [schemata_core::registry] Registered model Book
    Human,

    /// Logfmt format (key=value pairs)
    /// Example: timestamp=2024-01-15T10:30:00Z level=INFO target=schemata_core::registry message="Registered model Book"
    Logfmt,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "human" | "text" => Some(Self::Human),
            "logfmt" => Some(Self::Logfmt),
            _ => None,
        }
    }

    /// Format a log entry according to this format
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self {
            LogFormat::Json => format_json(entry),
            LogFormat::Human => format_human(entry),
            LogFormat::Logfmt => format_logfmt(entry),
        }
    }
}

/// A single rendered log record
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>, target: impl Into<String>) -> Self {
        Self { timestamp: Utc::now(), level, target: target.into(), message: message.into() }
    }

    pub fn from_record(record: &log::Record) -> Self {
        Self::new(record.level().into(), record.args().to_string(), record.target())
    }

    fn level_label(&self) -> String {
        format!("{:?}", self.level).to_uppercase()
    }
}

fn format_json(entry: &LogEntry) -> String {
    let json = serde_json::json!({
        "timestamp": entry.timestamp.to_rfc3339(),
        "level": entry.level_label(),
        "target": entry.target,
        "message": entry.message,
    });
    json.to_string()
}

fn format_human(entry: &LogEntry) -> String {
    format!(
        "{} {:5} [{}] {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        entry.level_label(),
        entry.target,
        entry.message
    )
}

fn format_logfmt(entry: &LogEntry) -> String {
    format!(
        "timestamp={} level={} target={} message=\"{}\"",
        entry.timestamp.to_rfc3339(),
        entry.level_label(),
        entry.target,
        entry.message.replace('"', "\\\"")
    )
}
