//! Randomized patrol for the helicopter
//!
//! The heading is perturbed at random intervals measured in elapsed time,
//! reflected off the faces of a fixed patrol box, and the final position is
//! clamped into the box every tick whatever the perturbation did.

use rand::Rng;

use crate::config::HelicopterConfig;
use crate::foundation::math::{constants, utils, Aabb, Vec3};
use crate::scene::Pose;

/// What one tick of the wanderer did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolStep {
    /// Heading was perturbed this tick
    pub direction_changed: bool,
    /// At least one axis was reflected this tick
    pub reflected: bool,
}

/// Stochastic patrol inside an axis-aligned box
#[derive(Debug, Clone)]
pub struct PatrolWanderer<R: Rng> {
    bounds: Aabb,
    direction: Vec3,
    speed: f32,
    smoothing: f32,
    yaw_offset: f32,
    interval_range: (f32, f32),
    perturbation: f32,
    time_since_change_ms: f32,
    next_change_ms: f32,
    rng: R,
}

impl<R: Rng> PatrolWanderer<R> {
    /// Create a wanderer from the helicopter configuration and an RNG
    pub fn from_config(config: &HelicopterConfig, mut rng: R) -> Self {
        let interval_range = config.change_interval_ms;
        let next_change_ms = draw_interval(&mut rng, interval_range);
        Self {
            bounds: config.bounds(),
            direction: utils::normalize_or(config.initial_heading, Vec3::x()),
            speed: config.speed,
            smoothing: config.smoothing,
            yaw_offset: 1.5 * constants::PI,
            interval_range,
            perturbation: config.perturbation,
            time_since_change_ms: 0.0,
            next_change_ms,
            rng,
        }
    }

    /// Patrol volume
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Stored heading; not necessarily unit length
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Milliseconds accumulated since the last heading change
    pub const fn time_since_change_ms(&self) -> f32 {
        self.time_since_change_ms
    }

    /// Milliseconds that must accumulate before the next heading change
    pub const fn next_change_ms(&self) -> f32 {
        self.next_change_ms
    }

    /// Advance one tick, `delta_seconds` after the previous one
    pub fn step(&mut self, delta_seconds: f32, pose: &mut Pose) -> PatrolStep {
        let delta_ms = if delta_seconds.is_finite() && delta_seconds > 0.0 {
            delta_seconds * 1000.0
        } else {
            0.0
        };
        self.time_since_change_ms += delta_ms;

        let direction_changed = self.time_since_change_ms >= self.next_change_ms;
        if direction_changed {
            self.perturb_direction();
        }

        let fallback = Vec3::x();
        let mut heading = utils::normalize_or(self.direction, fallback);
        let mut predicted = pose.position + heading * self.speed;

        let mut reflected = false;
        for axis in 0..3 {
            if predicted[axis] < self.bounds.min[axis] || predicted[axis] > self.bounds.max[axis] {
                self.direction[axis] = -self.direction[axis];
                reflected = true;
            }
        }
        if reflected {
            heading = utils::normalize_or(self.direction, heading);
            predicted = pose.position + heading * self.speed;
            log::trace!("Helicopter reflected, heading now {:?}", heading);
        }

        pose.position = self.bounds.clamp_point(predicted);

        let desired = utils::yaw_towards(heading.x, heading.z, self.yaw_offset);
        pose.yaw = utils::wrap_angle(utils::smooth_yaw(pose.yaw, desired, self.smoothing));

        PatrolStep {
            direction_changed,
            reflected,
        }
    }

    fn perturb_direction(&mut self) {
        let spread = self.perturbation;
        let mut perturbed = self.direction;
        if spread > 0.0 {
            for axis in 0..3 {
                perturbed[axis] += self.rng.gen_range(-spread..spread);
            }
        }
        // A perturbation that cancels the heading keeps the previous one
        let previous = utils::normalize_or(self.direction, Vec3::x());
        self.direction = utils::normalize_or(perturbed, previous);

        self.time_since_change_ms = 0.0;
        self.next_change_ms = draw_interval(&mut self.rng, self.interval_range);
        log::debug!(
            "Helicopter heading changed to {:?}, next change in {:.0} ms",
            self.direction,
            self.next_change_ms
        );
    }
}

fn draw_interval<R: Rng>(rng: &mut R, (low, high): (f32, f32)) -> f32 {
    if low < high {
        rng.gen_range(low..high)
    } else {
        low
    }
}
