//! Time management utilities
//!
//! The frame scheduler only needs "seconds since the previous tick"; the
//! [`Clock`] trait is that seam so real time and fixed steps are interchangeable.

use std::time::Instant;

/// Source of per-frame delta times
pub trait Clock {
    /// Advance the clock and return seconds elapsed since the previous tick
    fn tick(&mut self) -> f32;
}

/// High-precision timer for frame timing
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Get the time since the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Clock for FrameTimer {
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }
}

/// Clock that advances by a constant step every tick
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: f32,
    frame_count: u64,
}

impl FixedClock {
    /// Clock ticking at `rate_hz` frames per second
    pub fn from_rate(rate_hz: f32) -> Self {
        let step = if rate_hz > 0.0 { 1.0 / rate_hz } else { 0.0 };
        Self { step, frame_count: 0 }
    }

    /// Number of ticks taken so far
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Clock for FixedClock {
    fn tick(&mut self) -> f32 {
        self.frame_count += 1;
        self.step
    }
}
