//! Process-wide default logger.
//!
//! Prefer passing a [`LoggerHandle`] around. This module exists for call sites
//! that cannot, and runs in a degraded mode until [`initialize`] is called:
//!
//! - the level functions ([`info`], [`error`], ...) print a minimally colored
//!   `[LEVEL]: message` line directly, with no file output and no spinner
//!   awareness;
//! - [`logger`], [`highlight`] and the animation functions build a default
//!   handle on first use, which logs a debug notice saying so.
//!
//! Settings are resolved once, the first time they are needed (or when the
//! binary calls [`set_settings`]). The environment is not consulted again.

use std::sync::OnceLock;

use crate::ansi::{TermColor, BOLD, RESET};
use crate::config::Settings;
use crate::logger::{self, colored_line, default_line_color, LoggerHandle, DEFAULT_APP_NAME};
use crate::record::Level;
use crate::sink::Console;

static SETTINGS: OnceLock<Settings> = OnceLock::new();
static HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Install the settings used by the process-wide logger.
///
/// Returns the settings back if they were already resolved.
pub fn set_settings(settings: Settings) -> Result<(), Settings> {
    SETTINGS.set(settings)
}

/// Process-wide settings, loaded from the config file and environment on first use.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| {
        Settings::load().unwrap_or_else(|e| {
            eprintln!(
                "{}error: failed to load settings, using defaults: {e:#}{RESET}",
                TermColor::Red.code()
            );
            Settings::default()
        })
    })
}

/// Configure the process-wide logger, creating it if needed.
///
/// Calling this again reconfigures the same handle: the old sinks are closed
/// and replaced, so sinks never accumulate.
pub fn initialize(app_name: &str, debug_mode: bool, show_timestamp: Option<bool>) -> LoggerHandle {
    let mut created = false;
    let handle = HANDLE.get_or_init(|| {
        created = true;
        logger::initialize(settings(), app_name, debug_mode, show_timestamp)
    });
    if !created {
        handle.configure(app_name, debug_mode, show_timestamp);
    }
    handle.clone()
}

pub fn is_initialized() -> bool {
    HANDLE.get().is_some()
}

/// The process-wide handle, created with defaults if [`initialize`] was never called.
pub fn logger() -> LoggerHandle {
    let mut created = false;
    let handle = HANDLE.get_or_init(|| {
        created = true;
        let handle = LoggerHandle::new(settings().clone(), Console::stdout(), Console::stderr());
        handle.configure(DEFAULT_APP_NAME, true, None);
        handle
    });
    if created {
        handle.debug("Logger accessed before explicit initialization, initialized with defaults");
    }
    handle.clone()
}

/// The line a level function prints before [`initialize`]: info is left
/// uncolored, critical is bold red, the rest are colored whole-line.
pub fn fallback_line(level: Level, message: &str) -> String {
    match level {
        Level::Debug => colored_line(level, message, TermColor::Grey),
        Level::Info => format!("{}{message}", level.tag()),
        Level::Warning => colored_line(level, message, TermColor::Yellow),
        Level::Error => colored_line(level, message, TermColor::Red),
        Level::Critical => format!("{BOLD}{}", colored_line(level, message, TermColor::Red)),
    }
}

/// Degraded-mode output for a level function called before [`initialize`].
fn fallback(level: Level, message: &str, include_stack_trace: bool) {
    let line = fallback_line(level, message);
    let trace = include_stack_trace.then(std::backtrace::Backtrace::force_capture);
    if level >= Level::Error {
        eprintln!("{line}");
        if let Some(trace) = trace {
            eprintln!("{trace}");
        }
    } else {
        println!("{line}");
        if let Some(trace) = trace {
            println!("{trace}");
        }
    }
}

/// Log at `level` through the process-wide handle, or print directly if none exists.
pub fn log(level: Level, message: &str, include_stack_trace: bool) {
    match HANDLE.get() {
        Some(handle) if include_stack_trace => handle.log_with_trace(level, message),
        Some(handle) => handle.log(level, message),
        None => fallback(level, message, include_stack_trace),
    }
}

pub fn debug(message: &str) {
    log(Level::Debug, message, false);
}

pub fn info(message: &str) {
    log(Level::Info, message, false);
}

pub fn warning(message: &str) {
    log(Level::Warning, message, false);
}

pub fn error(message: &str) {
    log(Level::Error, message, false);
}

pub fn critical(message: &str) {
    log(Level::Critical, message, false);
}

/// Whole-line colored output. Never goes through the formatter or the log file.
pub fn write_colored(level: Level, message: &str, color: TermColor, include_stack_trace: bool) {
    match HANDLE.get() {
        Some(handle) => handle.write_colored(level, message, color, include_stack_trace),
        None => {
            println!("{}", colored_line(level, message, color));
            if include_stack_trace {
                println!("{}", std::backtrace::Backtrace::force_capture());
            }
        }
    }
}

/// `color` defaults to green.
pub fn info_with_color(message: &str, color: Option<TermColor>, include_stack_trace: bool) {
    let color = color.unwrap_or(default_line_color(Level::Info));
    write_colored(Level::Info, message, color, include_stack_trace);
}

/// `color` defaults to yellow.
pub fn warning_with_color(message: &str, color: Option<TermColor>, include_stack_trace: bool) {
    let color = color.unwrap_or(default_line_color(Level::Warning));
    write_colored(Level::Warning, message, color, include_stack_trace);
}

/// `color` defaults to red.
pub fn error_with_color(message: &str, color: Option<TermColor>, include_stack_trace: bool) {
    let color = color.unwrap_or(default_line_color(Level::Error));
    write_colored(Level::Error, message, color, include_stack_trace);
}

/// Raw output, no level tag or timestamp.
pub fn text(message: &str) {
    match HANDLE.get() {
        Some(handle) => handle.text(message),
        None => println!("{message}"),
    }
}

pub fn highlight(message: &str) {
    logger().highlight(message);
}

pub fn start_animation(message: &str) {
    logger().start_animation(message);
}

pub fn start_animation_with(message: &str, style_key: &str, color: TermColor) {
    logger().start_animation_with(message, style_key, color);
}

pub fn stop_animation(success: bool, final_message: Option<&str>) {
    logger().stop_animation(success, final_message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_lines_per_level() {
        assert_eq!(fallback_line(Level::Debug, "m"), "\x1b[90m[DEBUG]: m\x1b[0m");
        assert_eq!(fallback_line(Level::Info, "m"), "[INFO]: m");
        assert_eq!(fallback_line(Level::Warning, "m"), "\x1b[93m[WARNING]: m\x1b[0m");
        assert_eq!(fallback_line(Level::Error, "m"), "\x1b[91m[ERROR]: m\x1b[0m");
        assert_eq!(
            fallback_line(Level::Critical, "m"),
            "\x1b[1m\x1b[91m[CRITICAL]: m\x1b[0m"
        );
    }
}
