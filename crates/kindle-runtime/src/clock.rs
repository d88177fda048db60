//! Pausable program clock
//!
//! `ProgramClock` is the single source of game time. Pausing it freezes every
//! time-based behavior (animation, timers, game logic) until it is resumed,
//! and game time picks up exactly where it stopped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// A monotonic wall-clock reading
///
/// Implementations return the time elapsed since some fixed, arbitrary epoch.
/// Only differences between readings are meaningful.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Duration;
}

/// Wall-clock time backed by `std::time::Instant`
pub struct SystemTimeSource {
    epoch: Instant,
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A time source that only moves when told to (tests, replays, tools)
#[derive(Default)]
pub struct ManualTimeSource {
    now: Mutex<Duration>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the reading forward by `delta`
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }

    /// Jump to an absolute reading
    pub fn set(&self, value: Duration) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug)]
struct ClockState {
    /// Set by the first `setup()`; never cleared
    is_setup: bool,
    /// Source reading at the last resume
    started: Duration,
    /// Game time accumulated up to the last pause
    elapsed: Duration,
    paused: bool,
}

impl ClockState {
    fn resume(&mut self, now: Duration) {
        if self.paused && self.is_setup {
            self.paused = false;
            self.started = now;
        }
    }

    fn pause(&mut self, now: Duration) {
        if !self.paused {
            self.paused = true;
            self.elapsed += now.saturating_sub(self.started);
        }
    }

    fn time(&self, now: Duration) -> Duration {
        if self.paused {
            self.elapsed
        } else {
            self.elapsed + now.saturating_sub(self.started)
        }
    }
}

/// Pausable game-time clock
///
/// Cloning yields another handle to the same clock, so the input handler
/// that pauses the game and the loop that reads time share one state. Every
/// operation takes the same lock and none of them can fail.
///
/// The clock starts out paused and unset: `time()` reports zero and
/// `resume()` does nothing until `setup()` has run once.
#[derive(Clone)]
pub struct ProgramClock {
    state: Arc<Mutex<ClockState>>,
    source: Arc<dyn TimeSource>,
}

impl Default for ProgramClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgramClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ProgramClock")
            .field("is_setup", &state.is_setup)
            .field("paused", &state.paused)
            .field("time", &state.time(self.source.now()))
            .finish()
    }
}

impl ProgramClock {
    /// Create an unset clock reading the system wall clock
    pub fn new() -> Self {
        Self::with_source(Arc::new(SystemTimeSource::new()))
    }

    /// Create an unset clock reading a custom time source
    pub fn with_source(source: Arc<dyn TimeSource>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ClockState {
                is_setup: false,
                started: Duration::ZERO,
                elapsed: Duration::ZERO,
                paused: true,
            })),
            source,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ClockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start the clock. Repeated calls have no effect.
    pub fn setup(&self) {
        let mut state = self.lock();
        if state.is_setup {
            return;
        }
        let now = self.source.now();
        state.started = now;
        state.is_setup = true;
        state.resume(now);
        log::debug!("Program clock started");
    }

    /// Current game time
    pub fn time(&self) -> Duration {
        let state = self.lock();
        state.time(self.source.now())
    }

    /// Current game time in whole milliseconds
    pub fn time_millis(&self) -> u64 {
        self.time().as_millis() as u64
    }

    /// Freeze game time. Repeated calls have no effect.
    pub fn pause(&self) {
        let mut state = self.lock();
        state.pause(self.source.now());
    }

    /// Continue counting from the frozen value. Has no effect while running
    /// or before `setup()`.
    pub fn resume(&self) {
        let mut state = self.lock();
        state.resume(self.source.now());
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    pub fn is_setup(&self) -> bool {
        self.lock().is_setup
    }
}
