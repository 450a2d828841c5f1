//! Output sinks.
//!
//! A [`LoggerHandle`](crate::LoggerHandle) owns a list of [`Sink`]s: exactly one
//! [`ConsoleSink`] plus, when file logging is enabled and could be set up, one
//! [`FileSink`]. Re-initializing closes and replaces the whole list.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local};

use crate::animation::Animator;
use crate::error::LogError;
use crate::format::{ColoredFormatter, PlainFormatter};
use crate::record::{Level, LogRecord};

/// A writer shared between the foreground logger and the repaint task.
pub type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Cloneable handle to a terminal stream.
///
/// Every method takes the writer lock for the duration of its own write, so a
/// single call is never split. Two separate calls from different threads can
/// still interleave.
#[derive(Clone)]
pub struct Console {
    writer: SharedWriter,
}

impl Console {
    pub fn new(writer: SharedWriter) -> Self {
        Self { writer }
    }

    pub fn stdout() -> Self {
        Self::new(Arc::new(Mutex::new(io::stdout())))
    }

    pub fn stderr() -> Self {
        Self::new(Arc::new(Mutex::new(io::stderr())))
    }

    /// Write `text` as-is and flush.
    pub fn write_raw(&self, text: &str) -> io::Result<()> {
        let mut w = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        w.write_all(text.as_bytes())?;
        w.flush()
    }

    /// Write `line` followed by a newline.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut w = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(w, "{line}")?;
        w.flush()
    }

    /// Blank `width` columns of the current line and return to column zero.
    pub fn clear_line(&self, width: usize) -> io::Result<()> {
        self.write_raw(&erase_sequence(width))
    }

    /// Erase an animation line of `width` columns, then write `line`.
    pub fn write_line_over(&self, width: usize, line: &str) -> io::Result<()> {
        let mut w = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        w.flush()?;
        w.write_all(erase_sequence(width).as_bytes())?;
        w.flush()?;
        writeln!(w, "{line}")?;
        w.flush()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

/// `\r`, `width` spaces, `\r`.
pub fn erase_sequence(width: usize) -> String {
    format!("\r{}\r", " ".repeat(width))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    Console,
    File,
}

/// A destination for log records.
pub trait Sink: Send {
    fn kind(&self) -> SinkKind;

    /// Records below this level are skipped by the logger.
    fn level(&self) -> Level;

    fn emit(&mut self, record: &LogRecord) -> Result<(), LogError>;

    /// Release the underlying resource. Called when the sink is replaced.
    fn close(&mut self) -> Result<(), LogError> {
        Ok(())
    }
}

/// Console sink that clears an in-progress animation line before each record.
pub struct ConsoleSink {
    console: Console,
    formatter: ColoredFormatter,
    animator: Arc<Animator>,
}

impl ConsoleSink {
    pub fn new(console: Console, formatter: ColoredFormatter, animator: Arc<Animator>) -> Self {
        Self {
            console,
            formatter,
            animator,
        }
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn level(&self) -> Level {
        Level::Debug
    }

    fn emit(&mut self, record: &LogRecord) -> Result<(), LogError> {
        if record.is_control {
            self.console.write_raw(&record.message)?;
            return Ok(());
        }

        let line = self.formatter.format(record);
        // Width is read under the animation lock, but the write below is not.
        // A repaint tick landing in between can leave one stray frame; the
        // next record or tick cleans it up.
        let snapshot = self.animator.snapshot();
        if snapshot.active && snapshot.visible_width > 0 {
            self.console.write_line_over(snapshot.visible_width, &line)?;
        } else {
            self.console.write_line(&line)?;
        }
        Ok(())
    }
}

/// Name of the log file for one initialization: `{app}_{%Y-%m-%d_%H-%M-%S}.log`.
pub fn log_file_name(app_name: &str, started: DateTime<Local>) -> String {
    format!("{app_name}_{}.log", started.format("%Y-%m-%d_%H-%M-%S"))
}

/// Append-only plain-text log file.
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    level: Level,
    formatter: PlainFormatter,
}

impl FileSink {
    /// Create `dir` if needed and open a fresh log file inside it.
    pub fn open(
        dir: &Path,
        app_name: &str,
        started: DateTime<Local>,
        level: Level,
    ) -> Result<Self, LogError> {
        std::fs::create_dir_all(dir).map_err(|source| LogError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(log_file_name(app_name, started));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::OpenFile {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            level,
            formatter: PlainFormatter,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn level(&self) -> Level {
        self.level
    }

    fn emit(&mut self, record: &LogRecord) -> Result<(), LogError> {
        if record.is_control {
            return Ok(());
        }
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        writeln!(writer, "{}", self.formatter.format(record))?;
        writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), LogError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}
