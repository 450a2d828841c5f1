//! Terminal animation coordinator.
//!
//! [`Animator`] runs at most one background repaint task. The task redraws
//! `color + message + " " + glyph + reset + " "` in place every interval and
//! publishes the visible width of what it drew, so that the console sink can
//! blank exactly that many columns before printing a log line.
//!
//! All shared state lives in one mutex-guarded record. Cancellation goes
//! through a channel the task waits on between frames; [`Animator::stop`] waits
//! for an acknowledgement up to a timeout and abandons the task after that.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::ansi::{self, TermColor, RESET};
use crate::error::LogError;
use crate::sink::Console;
use crate::style::AnimationStyle;

/// Shared animation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    pub active: bool,
    /// Visible width of the line currently on screen.
    pub visible_width: usize,
    pub stop_requested: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    /// The task did not acknowledge in time and was abandoned.
    TimedOut,
    NotRunning,
}

struct RepaintTask {
    stop_tx: Sender<()>,
    done_rx: Receiver<()>,
    handle: JoinHandle<()>,
}

struct Guarded {
    state: AnimationState,
    /// Bumped for every spawned task and on abandonment. A task only touches
    /// the state while its generation is current.
    generation: u64,
    spawned: u64,
    task: Option<RepaintTask>,
}

pub struct Animator {
    shared: Arc<Mutex<Guarded>>,
    console: Console,
    interval: Duration,
    stop_timeout: Duration,
}

/// Render one animation line.
pub fn render_frame(message: &str, glyph: &str, color: TermColor) -> String {
    format!("{}{message} {glyph}{RESET} ", color.code())
}

fn lock(shared: &Mutex<Guarded>) -> MutexGuard<'_, Guarded> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Animator {
    pub fn new(console: Console, interval: Duration, stop_timeout: Duration) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Guarded {
                state: AnimationState::default(),
                generation: 0,
                spawned: 0,
                task: None,
            })),
            console,
            interval,
            stop_timeout,
        }
    }

    /// Current state, read under the lock.
    pub fn snapshot(&self) -> AnimationState {
        lock(&self.shared).state
    }

    pub fn is_active(&self) -> bool {
        self.snapshot().active
    }

    /// Number of repaint tasks spawned over the animator's lifetime.
    pub fn spawned_tasks(&self) -> u64 {
        lock(&self.shared).spawned
    }

    /// Start animating `message` unless an animation is already running.
    pub fn start(
        &self,
        message: &str,
        style: &'static AnimationStyle,
        color: TermColor,
    ) -> Result<StartOutcome, LogError> {
        let mut guard = lock(&self.shared);
        if guard.state.active {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let initial_width = ansi::visible_width(&render_frame(message, style.frame(0), color));
        guard.generation += 1;
        guard.state = AnimationState {
            active: true,
            visible_width: initial_width,
            stop_requested: false,
        };

        let (stop_tx, stop_rx) = mpsc::channel();
        let (done_tx, done_rx) = mpsc::channel();
        let repaint = Repaint {
            shared: Arc::clone(&self.shared),
            console: self.console.clone(),
            message: message.to_string(),
            style,
            color,
            interval: self.interval,
            generation: guard.generation,
        };

        let spawned = thread::Builder::new()
            .name("spinlog-repaint".into())
            .spawn(move || repaint.run(stop_rx, done_tx));

        match spawned {
            Ok(handle) => {
                guard.spawned += 1;
                guard.task = Some(RepaintTask {
                    stop_tx,
                    done_rx,
                    handle,
                });
                Ok(StartOutcome::Started)
            }
            Err(e) => {
                guard.state = AnimationState::default();
                Err(LogError::Spawn(e))
            }
        }
    }

    /// Stop the running animation, waiting up to the stop timeout.
    ///
    /// Safe to call when nothing is running.
    pub fn stop(&self) -> StopOutcome {
        let task = {
            let mut guard = lock(&self.shared);
            if !guard.state.active && guard.task.is_none() {
                return StopOutcome::NotRunning;
            }
            guard.state.stop_requested = true;
            guard.task.take()
        };

        let outcome = match task {
            Some(task) => {
                // A send error means the task already exited.
                let _ = task.stop_tx.send(());
                match task.done_rx.recv_timeout(self.stop_timeout) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                        if task.handle.join().is_err() {
                            tracing::debug!("repaint task panicked");
                        }
                        StopOutcome::Stopped
                    }
                    Err(RecvTimeoutError::Timeout) => StopOutcome::TimedOut,
                }
            }
            None => StopOutcome::Stopped,
        };

        let mut guard = lock(&self.shared);
        if outcome == StopOutcome::TimedOut {
            guard.generation += 1;
        }
        guard.state = AnimationState::default();
        outcome
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        let task = lock(&self.shared).task.take();
        if let Some(task) = task {
            let _ = task.stop_tx.send(());
        }
    }
}

struct Repaint {
    shared: Arc<Mutex<Guarded>>,
    console: Console,
    message: String,
    style: &'static AnimationStyle,
    color: TermColor,
    interval: Duration,
    generation: u64,
}

impl Repaint {
    fn run(self, stop_rx: Receiver<()>, done_tx: Sender<()>) {
        let mut last_width = 0;

        for glyph in self.style.cycle() {
            let line = render_frame(&self.message, glyph, self.color);
            let width = ansi::visible_width(&line);
            {
                let mut guard = lock(&self.shared);
                if guard.generation != self.generation || guard.state.stop_requested {
                    break;
                }
                guard.state.visible_width = width;
            }
            last_width = width;

            if self.console.write_raw(&format!("\r{line}")).is_err() {
                break;
            }

            match stop_rx.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        // An abandoned task leaves the terminal and the state to its successor.
        if lock(&self.shared).generation == self.generation {
            let _ = self.console.clear_line(last_width);
            let mut guard = lock(&self.shared);
            if guard.generation == self.generation {
                guard.state.active = false;
                guard.state.visible_width = 0;
            }
        }
        let _ = done_tx.send(());
    }
}
