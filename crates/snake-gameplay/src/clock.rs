//! Fixed-timestep tick gate.
//!
//! Movement cadence is set by `ticks_per_second` alone; frames can arrive at
//! any rate and only the frames that cross a tick boundary move the snake.

/// Default snake speed in ticks per second.
pub const DEFAULT_TICKS_PER_SECOND: f32 = 7.5;

/// Decides on which frames the simulation advances.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    /// Time of the last tick, in seconds
    last_tick_time: f64,
    /// Speed
    ticks_per_second: f32,
}

impl SimulationClock {
    /// Creates a clock whose first tick is one interval after `start`.
    #[must_use]
    pub fn new(start: f64, ticks_per_second: f32) -> Self {
        Self {
            last_tick_time: start,
            ticks_per_second: ticks_per_second.max(f32::EPSILON),
        }
    }

    /// Returns true if a tick is due at `now`, and starts the next interval.
    ///
    /// The interval restarts at `now` rather than at the ideal boundary, so
    /// a long stall produces a single tick, never a burst.
    pub fn poll(&mut self, now: f64) -> bool {
        if (now - self.last_tick_time) * f64::from(self.ticks_per_second) >= 1.0 {
            self.last_tick_time = now;
            true
        } else {
            false
        }
    }

    /// Time of the last tick.
    #[must_use]
    pub const fn last_tick_time(&self) -> f64 {
        self.last_tick_time
    }

    /// Ticks per second.
    #[must_use]
    pub const fn ticks_per_second(&self) -> f32 {
        self.ticks_per_second
    }

    /// Seconds between ticks.
    #[must_use]
    pub fn interval(&self) -> f64 {
        1.0 / f64::from(self.ticks_per_second)
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_TICKS_PER_SECOND)
    }
}
