//! Animation-aware console logging.
//!
//! spinlog prints colored, level-tagged log lines to the terminal (and plain
//! lines to a per-run log file) while a spinner animates on the current line.
//! Before each log line the console sink blanks the spinner, so log output and
//! animation frames never mix on one row. The spinner reappears on its next tick.
//!
//! ```no_run
//! use spinlog::{Settings, TermColor};
//!
//! let settings = Settings::load()?;
//! let log = spinlog::initialize(&settings, "worker", true, None);
//!
//! log.start_animation_with("Indexing", "dots", TermColor::Cyan);
//! log.info("picked up 42 files"); // spinner is erased first
//! log.stop_animation(true, Some("index ready"));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`logger`]: [`LoggerHandle`], the main entry point
//! - [`animation`]: the spinner coordinator and its repaint task
//! - [`sink`]: console and file sinks
//! - [`format`]: console and file line formats
//! - [`style`]: the animation style registry
//! - [`ansi`]: colors, escape stripping and display width
//! - [`config`]: settings from TOML and the environment
//! - [`global`]: process-wide default handle for code that can't take one
//! - [`layer`]: `tracing` integration

pub mod animation;
pub mod ansi;
pub mod config;
pub mod error;
pub mod format;
pub mod global;
pub mod layer;
pub mod logger;
pub mod record;
pub mod sink;
pub mod style;

pub use ansi::TermColor;
pub use config::Settings;
pub use error::LogError;
pub use logger::{initialize, LoggerHandle};
pub use record::{Level, LogRecord};
