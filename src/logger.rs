//! The logger handle.
//!
//! A [`LoggerHandle`] is cheap to clone and is passed to whatever needs to log.
//! [`initialize`] builds one on stdout/stderr. [`LoggerHandle::configure`] can
//! be called again at any time; it closes the current sinks and installs a
//! fresh console sink plus, if enabled, a fresh log file.

use std::backtrace::Backtrace;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;

use crate::animation::{AnimationState, Animator, StartOutcome, StopOutcome};
use crate::ansi::{TermColor, RESET};
use crate::config::Settings;
use crate::error::LogError;
use crate::format::ColoredFormatter;
use crate::record::{Level, LogRecord};
use crate::sink::{Console, ConsoleSink, FileSink, Sink, SinkKind};
use crate::style;

/// Logger name used before `configure` is first called.
pub const DEFAULT_APP_NAME: &str = "AppLogger";

struct Pipeline {
    name: String,
    level: Level,
    show_timestamp: bool,
    log_file: Option<PathBuf>,
    sinks: Vec<Box<dyn Sink>>,
}

struct Inner {
    settings: Settings,
    pipeline: Mutex<Pipeline>,
    console: Console,
    errors: Console,
    animator: Arc<Animator>,
}

#[derive(Clone)]
pub struct LoggerHandle {
    inner: Arc<Inner>,
}

/// Build a handle writing to stdout (log lines) and stderr (setup failures),
/// configured for `app_name`.
///
/// `show_timestamp: None` uses `settings.console.show_timestamp`.
pub fn initialize(
    settings: &Settings,
    app_name: &str,
    debug_mode: bool,
    show_timestamp: Option<bool>,
) -> LoggerHandle {
    let handle = LoggerHandle::new(settings.clone(), Console::stdout(), Console::stderr());
    handle.configure(app_name, debug_mode, show_timestamp);
    handle
}

impl LoggerHandle {
    /// An unconfigured handle: no sinks are attached until [`configure`](Self::configure).
    pub fn new(settings: Settings, console: Console, errors: Console) -> Self {
        let animator = Arc::new(Animator::new(
            console.clone(),
            settings.animation.interval(),
            settings.animation.stop_timeout(),
        ));
        Self {
            inner: Arc::new(Inner {
                pipeline: Mutex::new(Pipeline {
                    name: DEFAULT_APP_NAME.into(),
                    level: Level::Debug,
                    show_timestamp: settings.console.show_timestamp,
                    log_file: None,
                    sinks: Vec::new(),
                }),
                settings,
                console,
                errors,
                animator,
            }),
        }
    }

    fn pipeline(&self) -> MutexGuard<'_, Pipeline> {
        self.inner
            .pipeline
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// (Re)configure: set the level, close all sinks, attach a console sink and,
    /// if file logging is enabled, a new log file.
    ///
    /// A file setup failure is reported on the error stream and leaves the
    /// logger console-only.
    pub fn configure(&self, app_name: &str, debug_mode: bool, show_timestamp: Option<bool>) {
        let settings = &self.inner.settings;
        let show_timestamp = show_timestamp.unwrap_or(settings.console.show_timestamp);

        let mut pipeline = self.pipeline();
        for mut sink in pipeline.sinks.drain(..) {
            if let Err(e) = sink.close() {
                self.report(&format!("failed to close log sink: {e}"));
            }
        }

        pipeline.name = app_name.to_string();
        pipeline.level = if debug_mode { Level::Debug } else { Level::Info };
        pipeline.show_timestamp = show_timestamp;
        pipeline.log_file = None;
        pipeline.sinks.push(Box::new(ConsoleSink::new(
            self.inner.console.clone(),
            ColoredFormatter::new(show_timestamp),
            Arc::clone(&self.inner.animator),
        )));

        if settings.file.enabled {
            match FileSink::open(
                &settings.resolved_log_dir(),
                app_name,
                Local::now(),
                settings.file.level,
            ) {
                Ok(sink) => {
                    pipeline.log_file = Some(sink.path().to_path_buf());
                    pipeline.sinks.push(Box::new(sink));
                }
                Err(e) => self.report(&format!("failed to initialize file logging: {e}")),
            }
        }
    }

    /// Write straight to the error stream, bypassing the sinks.
    fn report(&self, message: &str) {
        let line = format!("{}error: {message}{RESET}", TermColor::Red.code());
        // Nowhere left to report a failure of the error stream itself.
        let _ = self.inner.errors.write_line(&line);
    }

    fn dispatch(&self, record: LogRecord) {
        let mut pipeline = self.pipeline();
        if !record.is_control && record.level < pipeline.level {
            return;
        }
        let mut failures = Vec::new();
        for sink in pipeline.sinks.iter_mut() {
            if !record.is_control && record.level < sink.level() {
                continue;
            }
            if let Err(e) = sink.emit(&record) {
                failures.push(e);
            }
        }
        drop(pipeline);
        for e in failures {
            self.report(&format!("failed to write log record: {e}"));
        }
    }

    fn record(&self, level: Level, message: String) -> LogRecord {
        let name = self.pipeline().name.clone();
        LogRecord::new(level, name, message)
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        let record = self.record(level, message.into());
        self.dispatch(record);
    }

    /// Like [`log`](Self::log), with the caller's backtrace appended.
    pub fn log_with_trace(&self, level: Level, message: impl Into<String>) {
        let message = with_trace(message.into());
        self.log(level, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }

    /// Info record with the body in blue.
    pub fn highlight(&self, message: &str) {
        self.info(TermColor::Blue.paint(message));
    }

    /// Raw, unformatted output on the console. Not written to the log file.
    pub fn text(&self, message: &str) {
        let record = LogRecord::control(self.name(), format!("{message}\n"));
        self.dispatch(record);
    }

    /// Write `[LEVEL]: message` entirely in `color`, bypassing the formatter
    /// and the level gate. Console only.
    pub fn write_colored(
        &self,
        level: Level,
        message: &str,
        color: TermColor,
        include_stack_trace: bool,
    ) {
        let line = colored_line(level, message, color);
        let state = self.inner.animator.snapshot();
        let written = if state.active && state.visible_width > 0 {
            self.inner.console.write_line_over(state.visible_width, &line)
        } else {
            self.inner.console.write_line(&line)
        };
        let written = written.and_then(|()| {
            if include_stack_trace {
                self.inner
                    .console
                    .write_line(&Backtrace::force_capture().to_string())
            } else {
                Ok(())
            }
        });
        if let Err(e) = written {
            self.report(&format!("failed to write log record: {}", LogError::from(e)));
        }
    }

    /// `color` defaults to green.
    pub fn info_with_color(
        &self,
        message: &str,
        color: Option<TermColor>,
        include_stack_trace: bool,
    ) {
        let color = color.unwrap_or(default_line_color(Level::Info));
        self.write_colored(Level::Info, message, color, include_stack_trace);
    }

    /// `color` defaults to yellow.
    pub fn warning_with_color(
        &self,
        message: &str,
        color: Option<TermColor>,
        include_stack_trace: bool,
    ) {
        let color = color.unwrap_or(default_line_color(Level::Warning));
        self.write_colored(Level::Warning, message, color, include_stack_trace);
    }

    /// `color` defaults to red.
    pub fn error_with_color(
        &self,
        message: &str,
        color: Option<TermColor>,
        include_stack_trace: bool,
    ) {
        let color = color.unwrap_or(default_line_color(Level::Error));
        self.write_colored(Level::Error, message, color, include_stack_trace);
    }

    /// Start a spinner with the configured default style and color.
    pub fn start_animation(&self, message: &str) {
        let animation = &self.inner.settings.animation;
        self.start_animation_with(message, &animation.style, animation.color);
    }

    /// Start a spinner. Unknown `style_key`s fall back to the default style.
    /// A no-op (debug-logged) if a spinner is already running.
    pub fn start_animation_with(&self, message: &str, style_key: &str, color: TermColor) {
        let style = style::lookup(style_key);
        match self.inner.animator.start(message, style, color) {
            Ok(StartOutcome::Started) => {}
            Ok(StartOutcome::AlreadyRunning) => {
                self.debug("Animation already running, not starting another one.");
            }
            Err(e) => self.error(format!("failed to start animation: {e}")),
        }
    }

    /// Stop the spinner (if any), then print `final_message` as a success
    /// (info, check mark) or failure (error, cross) line.
    pub fn stop_animation(&self, success: bool, final_message: Option<&str>) {
        if self.inner.animator.stop() == StopOutcome::TimedOut {
            self.debug(format!(
                "animation did not stop within {:?}, abandoning it",
                self.inner.settings.animation.stop_timeout()
            ));
        }

        let Some(message) = final_message else {
            return;
        };
        if success {
            self.info(format!("{} {message}", TermColor::Green.paint("✔")));
        } else {
            self.error(format!("{} {message}", TermColor::Red.paint("✖")));
        }
    }

    /// Stop any spinner and close all sinks.
    pub fn shutdown(&self) {
        self.inner.animator.stop();
        let mut pipeline = self.pipeline();
        let mut failures = Vec::new();
        for mut sink in pipeline.sinks.drain(..) {
            if let Err(e) = sink.close() {
                failures.push(e);
            }
        }
        drop(pipeline);
        for e in failures {
            self.report(&format!("failed to close log sink: {e}"));
        }
    }

    pub fn name(&self) -> String {
        self.pipeline().name.clone()
    }

    pub fn level(&self) -> Level {
        self.pipeline().level
    }

    pub fn shows_timestamp(&self) -> bool {
        self.pipeline().show_timestamp
    }

    /// Path of the current log file, if file logging is active.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.pipeline().log_file.clone()
    }

    /// Number of attached (console, file) sinks.
    pub fn sink_counts(&self) -> (usize, usize) {
        let pipeline = self.pipeline();
        let count = |kind: SinkKind| pipeline.sinks.iter().filter(|s| s.kind() == kind).count();
        (count(SinkKind::Console), count(SinkKind::File))
    }

    pub fn animation_state(&self) -> AnimationState {
        self.inner.animator.snapshot()
    }

    /// Repaint tasks spawned so far by this handle.
    pub fn spawned_animations(&self) -> u64 {
        self.inner.animator.spawned_tasks()
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }
}

impl std::fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

/// `{color}[LEVEL]: message{reset}`
pub fn colored_line(level: Level, message: &str, color: TermColor) -> String {
    format!("{}{}{message}{RESET}", color.code(), level.tag())
}

/// Whole-line color used by the `*_with_color` helpers when none is given.
pub fn default_line_color(level: Level) -> TermColor {
    match level {
        Level::Debug => TermColor::Grey,
        Level::Info => TermColor::Green,
        Level::Warning => TermColor::Yellow,
        Level::Error | Level::Critical => TermColor::Red,
    }
}

pub(crate) fn with_trace(message: String) -> String {
    format!("{message}\n{}", Backtrace::force_capture())
}
