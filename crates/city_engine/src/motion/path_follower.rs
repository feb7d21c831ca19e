//! Rectangular-loop driver for the car
//!
//! The loop is four straight legs between threshold lines. Which leg the car
//! is on is not stored; it is derived every tick from position alone by
//! [`Zone::classify`], so the follower is a state machine whose transition
//! guards are the threshold comparisons.

use crate::config::CarConfig;
use crate::foundation::math::{constants, utils, Vec2};
use crate::scene::Pose;

/// The four legs of the loop, named by travel direction.
///
/// Directions are in the (x, z) plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Travelling +x along the north edge
    East,
    /// Travelling -z along the east edge
    South,
    /// Travelling -x along the south edge
    West,
    /// Travelling +z along the west edge
    North,
}

impl Zone {
    /// Pick the leg for a position.
    ///
    /// Conditions are tested in priority order, which also settles corner
    /// points lying on two threshold lines at once. Positions strictly inside
    /// the rectangle match nothing.
    pub fn classify(x: f32, z: f32, thresholds: &LoopThresholds) -> Option<Self> {
        let LoopThresholds {
            x_low,
            x_high,
            z_low,
            z_high,
        } = *thresholds;

        if x < x_high && z >= z_high {
            Some(Self::East)
        } else if x >= x_high && z > z_low {
            Some(Self::South)
        } else if z <= z_low && x > x_low {
            Some(Self::West)
        } else if x <= x_low && z < z_high {
            Some(Self::North)
        } else {
            None
        }
    }

    /// Unit travel direction as (x, z)
    pub fn direction(self) -> Vec2 {
        match self {
            Self::East => Vec2::new(1.0, 0.0),
            Self::South => Vec2::new(0.0, -1.0),
            Self::West => Vec2::new(-1.0, 0.0),
            Self::North => Vec2::new(0.0, 1.0),
        }
    }

    /// The leg that follows this one around the loop
    pub const fn next(self) -> Self {
        match self {
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
            Self::North => Self::East,
        }
    }
}

/// Threshold lines bounding the loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopThresholds {
    /// West edge
    pub x_low: f32,
    /// East edge
    pub x_high: f32,
    /// South edge
    pub z_low: f32,
    /// North edge
    pub z_high: f32,
}

/// What one tick of the follower did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    /// Leg travelled this tick
    pub zone: Zone,
    /// `true` when the position matched no leg and the previous one was kept
    pub fallback: bool,
}

/// Deterministic loop driver
#[derive(Debug, Clone)]
pub struct PathFollower {
    thresholds: LoopThresholds,
    speed: f32,
    smoothing: f32,
    yaw_offset: f32,
    last_zone: Zone,
}

impl PathFollower {
    /// Create a follower
    pub const fn new(thresholds: LoopThresholds, speed: f32, smoothing: f32) -> Self {
        Self {
            thresholds,
            speed,
            smoothing,
            yaw_offset: constants::PI,
            last_zone: Zone::East,
        }
    }

    /// Create a follower from the car configuration
    pub const fn from_config(config: &CarConfig) -> Self {
        Self::new(
            LoopThresholds {
                x_low: config.x_low,
                x_high: config.x_high,
                z_low: config.z_low,
                z_high: config.z_high,
            },
            config.speed,
            config.smoothing,
        )
    }

    /// Loop thresholds in use
    pub const fn thresholds(&self) -> &LoopThresholds {
        &self.thresholds
    }

    /// Leg used on the most recent tick
    pub const fn last_zone(&self) -> Zone {
        self.last_zone
    }

    /// Travel direction for a position, holding the last leg when none matches
    pub fn direction_for(&self, x: f32, z: f32) -> Vec2 {
        Zone::classify(x, z, &self.thresholds)
            .unwrap_or(self.last_zone)
            .direction()
    }

    /// Advance one tick
    pub fn step(&mut self, pose: &mut Pose) -> PathStep {
        let classified = Zone::classify(pose.position.x, pose.position.z, &self.thresholds);
        let fallback = classified.is_none();
        if fallback {
            log::warn!(
                "Car at ({:.3}, {:.3}) is on no leg of the loop, holding {:?}",
                pose.position.x,
                pose.position.z,
                self.last_zone
            );
        }
        let zone = classified.unwrap_or(self.last_zone);
        if zone != self.last_zone {
            log::debug!("Car turned from {:?} to {:?}", self.last_zone, zone);
        }
        self.last_zone = zone;

        let direction = utils::normalize_or_2d(zone.direction(), Vec2::new(1.0, 0.0));
        pose.position.x += direction.x * self.speed;
        pose.position.z += direction.y * self.speed;

        let desired = utils::yaw_towards(direction.x, direction.y, self.yaw_offset);
        // Stored wrapped so laps do not accumulate full turns
        pose.yaw = utils::wrap_angle(utils::smooth_yaw(pose.yaw, desired, self.smoothing));

        PathStep { zone, fallback }
    }
}
