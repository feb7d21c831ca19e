//! Intro camera flight
//!
//! After a short delay the camera flies from a low corner of the city to
//! the overview point along a straight line with quartic in-out easing.

use crate::config::CameraConfig;
use crate::foundation::math::Vec3;

/// Quartic ease-in-out; `t` is clamped to `[0, 1]`
#[inline]
pub fn ease_in_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        8.0 * t.powi(4)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

/// Where the flight is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroPhase {
    /// Holding at the start point
    Waiting,
    /// Moving
    Flying,
    /// Arrived; orbit controls may take over
    Done,
}

/// Delayed, eased camera flight between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroFlight {
    from: Vec3,
    to: Vec3,
    delay_ms: f32,
    duration_ms: f32,
    elapsed_ms: f32,
}

impl IntroFlight {
    /// Flight from `from` to `to`
    pub fn new(from: Vec3, to: Vec3, delay_ms: f32, duration_ms: f32) -> Self {
        Self {
            from,
            to,
            delay_ms: delay_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
        }
    }

    /// Flight described by configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(
            config.intro_from,
            config.intro_to,
            config.intro_delay_ms,
            config.intro_duration_ms,
        )
    }

    /// Current phase
    pub fn phase(&self) -> IntroPhase {
        if self.elapsed_ms < self.delay_ms {
            IntroPhase::Waiting
        } else if self.elapsed_ms < self.delay_ms + self.duration_ms {
            IntroPhase::Flying
        } else {
            IntroPhase::Done
        }
    }

    /// `true` once the camera has arrived
    pub fn is_done(&self) -> bool {
        self.phase() == IntroPhase::Done
    }

    /// Eased progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return if self.is_done() { 1.0 } else { 0.0 };
        }
        ease_in_out_quart((self.elapsed_ms - self.delay_ms) / self.duration_ms)
    }

    /// Camera position for the current progress
    pub fn position(&self) -> Vec3 {
        self.from.lerp(&self.to, self.progress())
    }

    /// Advance by `delta_seconds` and return the new phase
    pub fn advance(&mut self, delta_seconds: f32) -> IntroPhase {
        if delta_seconds.is_finite() && delta_seconds > 0.0 && !self.is_done() {
            let before = self.phase();
            self.elapsed_ms += delta_seconds * 1000.0;
            let after = self.phase();
            if before != after {
                log::debug!("Intro flight {:?} -> {:?}", before, after);
            }
        }
        self.phase()
    }
}
