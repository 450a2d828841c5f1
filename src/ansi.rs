//! Terminal color codes and display-width measurement.
//!
//! Widths here are deliberately coarse: after stripping ANSI escape sequences,
//! ASCII counts as one column and every other code point counts as two. The
//! spinner uses this to know how many columns to blank before a log line.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";
/// Bold attribute, combined with a color in degraded-mode critical output.
pub const BOLD: &str = "\x1b[1m";

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").expect("valid ANSI escape pattern")
});

/// Named terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermColor {
    Grey,
    Green,
    Yellow,
    Red,
    Blue,
    White,
    Cyan,
    Magenta,
    LightBlue,
    /// 256-color palette entry 208.
    Orange,
}

impl TermColor {
    pub const ALL: [TermColor; 10] = [
        Self::Grey,
        Self::Green,
        Self::Yellow,
        Self::Red,
        Self::Blue,
        Self::White,
        Self::Cyan,
        Self::Magenta,
        Self::LightBlue,
        Self::Orange,
    ];

    /// The escape sequence that switches the terminal to this color.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Grey => "\x1b[90m",
            Self::Green => "\x1b[92m",
            Self::Yellow => "\x1b[93m",
            Self::Red => "\x1b[91m",
            // light_blue shares the bright blue code
            Self::Blue | Self::LightBlue => "\x1b[94m",
            Self::White => "\x1b[97m",
            Self::Cyan => "\x1b[96m",
            Self::Magenta => "\x1b[95m",
            Self::Orange => "\x1b[38;5;208m",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grey => "grey",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::White => "white",
            Self::Cyan => "cyan",
            Self::Magenta => "magenta",
            Self::LightBlue => "light_blue",
            Self::Orange => "orange",
        }
    }

    /// Wrap `text` in this color followed by a reset.
    pub fn paint(&self, text: &str) -> String {
        format!("{}{text}{RESET}", self.code())
    }
}

impl std::fmt::Display for TermColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TermColor {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grey" | "gray" => Ok(Self::Grey),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            "white" => Ok(Self::White),
            "cyan" => Ok(Self::Cyan),
            "magenta" => Ok(Self::Magenta),
            "light_blue" | "light-blue" => Ok(Self::LightBlue),
            "orange" => Ok(Self::Orange),
            _ => Err(LogError::UnknownColor(s.to_string())),
        }
    }
}

/// Remove ANSI escape sequences from `text`.
pub fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

/// Width of an already-stripped string: ASCII is 1 column, anything else 2.
pub fn char_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

/// Display width of `text` after stripping escape sequences.
pub fn visible_width(text: &str) -> usize {
    char_width(&strip_ansi(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_is_length() {
        assert_eq!(visible_width("Loading ... "), 12);
        assert_eq!(visible_width(""), 0);
    }

    #[test]
    fn non_ascii_counts_double() {
        assert_eq!(visible_width("任务中"), 6);
        assert_eq!(visible_width("⢿"), 2);
    }

    #[test]
    fn mixed_width_sums_per_char() {
        // "ab" = 2, "中" = 2, " " = 1, "⣻" = 2
        assert_eq!(visible_width("ab中 ⣻"), 7);
    }

    #[test]
    fn escapes_are_not_counted() {
        let line = format!("{}Loading ⢿{} ", TermColor::White.code(), RESET);
        assert_eq!(strip_ansi(&line), "Loading ⢿ ");
        assert_eq!(visible_width(&line), 11);

        let orange = TermColor::Orange.paint("x");
        assert_eq!(visible_width(&orange), 1);
    }

    #[test]
    fn color_names_parse() {
        assert_eq!("light_blue".parse::<TermColor>().unwrap(), TermColor::LightBlue);
        assert_eq!("Gray".parse::<TermColor>().unwrap(), TermColor::Grey);
        let err = "chartreuse".parse::<TermColor>().unwrap_err();
        assert!(matches!(err, LogError::UnknownColor(ref name) if name == "chartreuse"));
        assert_eq!(err.to_string(), "unknown color: chartreuse");
        for color in TermColor::ALL {
            assert_eq!(color.as_str().parse::<TermColor>().unwrap(), color);
        }
    }
}
