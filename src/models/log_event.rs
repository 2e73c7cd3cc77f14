use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a streamed log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Success,
}

impl LogLevel {
    /// Upper-case label used in the formatted terminal line.
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Success => "SUCCESS",
        }
    }
}

/// Origin of a streamed log event.
///
/// Unknown sources are kept verbatim so new backend producers still render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogSource {
    Build,
    Runtime,
    Bot,
    Other(String),
}

impl LogSource {
    pub fn as_str(&self) -> &str {
        match self {
            LogSource::Build => "build",
            LogSource::Runtime => "runtime",
            LogSource::Bot => "bot",
            LogSource::Other(name) => name,
        }
    }

    /// Build output is the default channel and carries no tag.
    pub fn is_build(&self) -> bool {
        matches!(self, LogSource::Build)
    }
}

impl From<String> for LogSource {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "build" => LogSource::Build,
            "runtime" => LogSource::Runtime,
            "bot" => LogSource::Bot,
            _ => LogSource::Other(value),
        }
    }
}

impl From<LogSource> for String {
    fn from(value: LogSource) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured log message pushed by the project's log stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub message: String,
    pub level: LogLevel,
    pub source: LogSource,
    pub timestamp: DateTime<Utc>,
}

impl LogEvent {
    pub fn new(
        message: impl Into<String>,
        level: LogLevel,
        source: LogSource,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            message: message.into(),
            level,
            source,
            timestamp,
        }
    }

    /// Parse an event from its JSON wire form.
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}
