//! Frame timing and performance tracking.
//!
//! Provides the monotonic clock fed to the game loop, FPS limiting when
//! VSync is off, and a small FPS counter.

use std::time::{Duration, Instant};

/// Monotonic time source for the simulation, in seconds since startup.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    start: Instant,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Starts the clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the clock was created.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Frame timing manager.
#[derive(Debug)]
pub struct FrameTiming {
    /// Time budget per frame
    frame_budget: Duration,
    /// Time of last frame start
    last_frame: Instant,
    /// Whether VSync is enabled (disables manual frame limiting)
    vsync: bool,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FrameTiming {
    /// Create a new frame timing manager.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            last_frame: Instant::now(),
            vsync: true,
        }
    }

    /// Create with VSync setting.
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Marks the start of a frame and returns seconds since the previous one.
    pub fn begin_frame(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        dt
    }

    /// Sleep for the remainder of the frame budget (if VSync is off).
    pub fn sleep_remainder(&self) {
        if self.vsync {
            return;
        }

        let elapsed = self.last_frame.elapsed();
        if elapsed < self.frame_budget {
            let sleep_time = self.frame_budget - elapsed;
            // Spin the last millisecond, sleep granularity is too coarse
            if sleep_time > Duration::from_millis(1) {
                std::thread::sleep(sleep_time - Duration::from_millis(1));
            }
            while self.last_frame.elapsed() < self.frame_budget {
                std::hint::spin_loop();
            }
        }
    }

    /// Reset timing (call after the window is created).
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }
}

/// FPS counter for the periodic FPS log, fed with frame deltas.
#[derive(Debug)]
pub struct FpsCounter {
    /// Frames since last update
    frame_count: u32,
    /// Seconds accumulated since last update
    elapsed: f32,
    /// Update interval in seconds
    update_interval: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    /// Create a counter that refreshes twice a second.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interval(0.5)
    }

    /// Create a counter that refreshes every `update_interval` seconds.
    #[must_use]
    pub fn with_interval(update_interval: f32) -> Self {
        Self {
            frame_count: 0,
            elapsed: 0.0,
            update_interval,
        }
    }

    /// Records one frame of length `dt` seconds.
    ///
    /// Returns `Some((fps, frame_time_ms))` once per interval.
    pub fn tick(&mut self, dt: f32) -> Option<(f32, f32)> {
        self.frame_count += 1;
        self.elapsed += dt;

        if self.elapsed < self.update_interval {
            return None;
        }

        let fps = self.frame_count as f32 / self.elapsed;
        let frame_time = (self.elapsed / self.frame_count as f32) * 1000.0;
        self.frame_count = 0;
        self.elapsed = 0.0;

        Some((fps, frame_time))
    }
}
