//! Fixed-timestep accumulator driven by game time

use std::time::Duration;

/// Turns game-time readings from a `ProgramClock` into per-frame deltas and
/// fixed simulation steps.
///
/// Because it is fed game time rather than wall time, a paused clock produces
/// zero deltas and no fixed steps.
///
/// [`ProgramClock`]: crate::ProgramClock
pub struct FrameTimer {
    /// Game time at the last tick
    pub total_time: Duration,
    /// Game time advanced by the last tick, clamped to `max_delta`
    pub delta_time: Duration,
    /// Fixed simulation step (default: 1/60 second)
    pub fixed_timestep: Duration,
    /// Upper bound on a single frame's delta
    pub max_delta: Duration,
    accumulator: Duration,
    first_tick: bool,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self {
            total_time: Duration::ZERO,
            delta_time: Duration::ZERO,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            max_delta: Duration::from_millis(250),
            accumulator: Duration::ZERO,
            first_tick: true,
        }
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timer with a custom fixed step rate
    ///
    /// `hz` must be positive and finite. Any rate that does not give a
    /// non-zero step keeps the default 60 Hz.
    pub fn with_fixed_rate(hz: f64) -> Self {
        let mut timer = Self::default();
        match Duration::try_from_secs_f64(1.0 / hz) {
            Ok(step) if hz > 0.0 && !step.is_zero() => timer.fixed_timestep = step,
            _ => log::warn!("Invalid fixed update rate {hz} Hz, using the default"),
        }
        timer
    }

    /// Advance to the given game time. Call once per frame.
    pub fn tick(&mut self, game_time: Duration) {
        if self.first_tick {
            self.first_tick = false;
            self.total_time = game_time;
            self.delta_time = Duration::ZERO;
            return;
        }

        let elapsed = game_time.saturating_sub(self.total_time);
        self.total_time = game_time;

        // Clamp to avoid spiral of death
        self.delta_time = elapsed.min(self.max_delta);
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator = self.accumulator.saturating_sub(self.fixed_timestep);
    }

    /// Interpolation alpha for rendering between fixed steps
    pub fn interpolation_alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.fixed_timestep.as_secs_f64()
    }
}
