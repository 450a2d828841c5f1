#![allow(dead_code)]

use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spinlog::sink::Console;
use spinlog::{LoggerHandle, Settings};

/// In-memory terminal that records everything written to it.
#[derive(Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
    delay: Option<Duration>,
}

impl Capture {
    /// A capture whose every write blocks for `delay`.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn console(&self) -> Console {
        Console::new(Arc::new(Mutex::new(self.clone())))
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Settings with file logging off and a fast spinner.
pub fn console_settings() -> Settings {
    let mut settings = Settings::default();
    settings.file.enabled = false;
    settings.animation.interval_ms = 20;
    settings
}

/// Settings writing log files into `dir`.
pub fn file_settings(dir: &Path) -> Settings {
    let mut settings = console_settings();
    settings.file.enabled = true;
    settings.file.directory = dir.to_string_lossy().into_owned();
    settings
}

/// A handle over captured stdout/stderr, not yet configured.
pub fn captured_handle(settings: Settings) -> (LoggerHandle, Capture, Capture) {
    let out = Capture::default();
    let err = Capture::default();
    let handle = LoggerHandle::new(settings, out.console(), err.console());
    (handle, out, err)
}
