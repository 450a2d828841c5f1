//! Console and file formatters.

use crate::ansi::{self, TermColor, RESET};
use crate::record::{Level, LogRecord};

/// Timestamp format shared by console and file output.
pub const DATE_FORMAT: &str = "%Y-%m-%d-%H:%M:%S";

/// Console formatter: optional timestamp, colored level tag, plain body.
///
/// Debug records are greyed out as a whole line, timestamp included. Other
/// levels color only the tag.
#[derive(Debug, Clone, Copy)]
pub struct ColoredFormatter {
    pub show_timestamp: bool,
}

impl ColoredFormatter {
    pub fn new(show_timestamp: bool) -> Self {
        Self { show_timestamp }
    }

    pub fn format(&self, record: &LogRecord) -> String {
        if record.is_control {
            return record.message.clone();
        }

        let timestamp = if self.show_timestamp {
            format!("{} ", record.timestamp.format(DATE_FORMAT))
        } else {
            String::new()
        };
        let tag = record.level.tag();
        let message = &record.message;

        if record.level == Level::Debug {
            return format!("{}{timestamp}{tag}{message}{RESET}", TermColor::Grey.code());
        }

        let color = match record.level {
            Level::Info => TermColor::Green.code(),
            Level::Warning => TermColor::Yellow.code(),
            Level::Error => TermColor::Red.code(),
            _ => "",
        };
        format!("{timestamp}{color}{tag}{RESET}{message}")
    }
}

/// File formatter: `timestamp - logger - LEVEL - message`, escapes removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn format(&self, record: &LogRecord) -> String {
        format!(
            "{} - {} - {} - {}",
            record.timestamp.format(DATE_FORMAT),
            record.logger,
            record.level,
            ansi::strip_ansi(&record.message)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(level: Level, msg: &str) -> LogRecord {
        LogRecord::new(level, "app", msg)
    }

    #[test]
    fn info_colors_only_the_tag() {
        let line = ColoredFormatter::new(false).format(&rec(Level::Info, "hello"));
        assert_eq!(line, "\x1b[92m[INFO]: \x1b[0mhello");
    }

    #[test]
    fn debug_colors_whole_line() {
        let line = ColoredFormatter::new(true).format(&rec(Level::Debug, "quiet"));
        assert!(line.starts_with("\x1b[90m"));
        assert!(line.ends_with("[DEBUG]: quiet\x1b[0m"));
        // timestamp sits inside the grey span
        let inner = ansi::strip_ansi(&line);
        assert_eq!(inner.len(), "2024-01-01-00:00:00 [DEBUG]: quiet".len());
    }

    #[test]
    fn warning_and_error_colors() {
        let f = ColoredFormatter::new(false);
        assert!(f.format(&rec(Level::Warning, "w")).starts_with("\x1b[93m[WARNING]: "));
        assert!(f.format(&rec(Level::Error, "e")).starts_with("\x1b[91m[ERROR]: "));
        assert_eq!(f.format(&rec(Level::Critical, "c")), "[CRITICAL]: \x1b[0mc");
    }

    #[test]
    fn timestamp_prefix_is_optional() {
        let with = ColoredFormatter::new(true).format(&rec(Level::Info, "x"));
        let without = ColoredFormatter::new(false).format(&rec(Level::Info, "x"));
        assert!(without.starts_with("\x1b[92m"));
        assert!(!with.starts_with('\x1b'));
        assert_eq!(with.find(' '), Some(19));
    }

    #[test]
    fn control_records_pass_through() {
        let raw = LogRecord::control("app", "\r\x1b[97mLoading ⢿\x1b[0m ");
        assert_eq!(ColoredFormatter::new(true).format(&raw), raw.message);
    }

    #[test]
    fn plain_format_has_no_escapes() {
        let line = PlainFormatter.format(&rec(Level::Info, "\x1b[92m✔\x1b[0m done"));
        assert!(line.ends_with(" - app - INFO - ✔ done"));
        assert!(!line.contains('\x1b'));
    }
}
