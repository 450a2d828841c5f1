use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ansi::TermColor;
use crate::error::LogError;
use crate::record::Level;
use crate::style;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// `tracing` filter used by the binary when `RUST_LOG` is unset.
    pub log_level: String,
    pub console: ConsoleSettings,
    pub file: FileSettings,
    pub animation: AnimationSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Default for `initialize(.., show_timestamp: None)`.
    pub show_timestamp: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FileSettings {
    pub enabled: bool,
    pub directory: String,
    pub level: Level,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnimationSettings {
    pub style: String,
    pub color: TermColor,
    pub interval_ms: u64,
    pub stop_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "debug".into(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            show_timestamp: false,
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: "run_logs".into(),
            level: Level::Debug,
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            style: style::DEFAULT_STYLE.into(),
            color: TermColor::White,
            interval_ms: 120,
            stop_timeout_ms: 2000,
        }
    }
}

impl AnimationSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

/// Returns `~/.spinlog/`, or `.spinlog/` when no home directory is known.
pub fn default_spinlog_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".spinlog"))
        .unwrap_or_else(|| PathBuf::from(".spinlog"))
}

/// Returns the default config file path: `~/.spinlog/config.toml`
pub fn default_config_path() -> PathBuf {
    default_spinlog_dir().join("config.toml")
}

impl Settings {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut settings = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            Settings::default()
        };

        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment variable overrides.
    ///
    /// `CONSOLE_SHOW_TIMESTAMP` and `DEBUG_MODE` are true only for a
    /// case-insensitive `"true"`. `DEBUG_MODE` picks the file level.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CONSOLE_SHOW_TIMESTAMP") {
            self.console.show_timestamp = is_true(&val);
        }
        if let Ok(val) = std::env::var("DEBUG_MODE") {
            self.file.level = if is_true(&val) {
                Level::Debug
            } else {
                Level::Info
            };
        }
        if let Ok(val) = std::env::var("SPINLOG_FILE_LOGGING") {
            self.file.enabled = is_true(&val);
        }
        if let Ok(val) = std::env::var("SPINLOG_LOG_DIR") {
            self.file.directory = val;
        }
        if let Ok(val) = std::env::var("SPINLOG_LOG_LEVEL") {
            self.log_level = val;
        }
    }

    fn validate(&self) -> Result<(), LogError> {
        if self.animation.interval_ms == 0 {
            return Err(LogError::Config("animation.interval_ms must be positive".into()));
        }
        if style::get(&self.animation.style).is_none() {
            tracing::warn!(style = %self.animation.style, "unknown animation style, using default");
        }
        Ok(())
    }

    /// Resolve the log directory, expanding `~` if needed.
    pub fn resolved_log_dir(&self) -> PathBuf {
        expand_tilde(&self.file.directory)
    }
}

fn is_true(val: &str) -> bool {
    val.trim().eq_ignore_ascii_case("true")
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
