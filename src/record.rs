//! Log levels and records.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Upper-case name used in level tags and the log file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Level tag as printed on the console, e.g. `[INFO]: `.
    pub fn tag(&self) -> String {
        format!("[{}]: ", self.as_str())
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("unknown log level: {s}")),
        }
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        if *level == tracing::Level::ERROR {
            Self::Error
        } else if *level == tracing::Level::WARN {
            Self::Warning
        } else if *level == tracing::Level::INFO {
            Self::Info
        } else {
            Self::Debug
        }
    }
}

/// A single log emission.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    /// Name of the logger that produced the record (the app name).
    pub logger: String,
    pub timestamp: DateTime<Local>,
    /// Control records are raw terminal writes: no formatting, no interception,
    /// never written to the log file.
    pub is_control: bool,
}

impl LogRecord {
    pub fn new(level: Level, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            logger: logger.into(),
            timestamp: Local::now(),
            is_control: false,
        }
    }

    /// A raw write. The level is nominal; control records pass every level gate.
    pub fn control(logger: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            is_control: true,
            ..Self::new(Level::Info, logger, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn parse_level_names() {
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert!("loud".parse::<Level>().is_err());
    }

    #[test]
    fn tracing_levels_map_down() {
        assert_eq!(Level::from(&tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from(&tracing::Level::WARN), Level::Warning);
    }

    #[test]
    fn control_records_are_flagged() {
        let rec = LogRecord::control("app", "\rframe");
        assert!(rec.is_control);
        assert!(!LogRecord::new(Level::Info, "app", "hi").is_control);
        assert_eq!(Level::Error.tag(), "[ERROR]: ");
    }
}
