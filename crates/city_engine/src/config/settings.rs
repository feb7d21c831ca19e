//! # Scene Configuration
//!
//! Every tunable the scene uses: actor spawn placements, motion constants,
//! the light oscillator, initial lighting, camera and intro flight, click
//! rules and model paths. Defaults reproduce the shipped city scene, so an
//! empty config file behaves exactly like no file at all.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::{constants, Aabb, Vec3};
use crate::lighting::Axis;
use crate::picking::{ClickAction, ClickRule};

/// Root configuration for the city scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CityConfig {
    /// Car path follower
    pub car: CarConfig,
    /// Helicopter patrol
    pub helicopter: HelicopterConfig,
    /// Day/night oscillator
    pub light_cycle: LightCycleConfig,
    /// Initial light values
    pub lighting: LightingConfig,
    /// Camera and intro flight
    pub camera: CameraConfig,
    /// Click-to-link rules
    pub clicks: ClickConfig,
    /// Model locations
    pub assets: AssetPaths,
}

impl Config for CityConfig {}

impl CityConfig {
    /// Reject values the motion, lighting and camera code cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let car = &self.car;
        check_finite_vec("car.spawn", car.spawn)?;
        check_ordered("car.x_low", car.x_low, car.x_high, "must be below car.x_high")?;
        check_ordered("car.z_low", car.z_low, car.z_high, "must be below car.z_high")?;
        check_positive("car.speed", car.speed)?;
        check_smoothing("car.smoothing", car.smoothing)?;

        let heli = &self.helicopter;
        check_finite_vec("helicopter.spawn", heli.spawn)?;
        check_finite_vec("helicopter.bounds_min", heli.bounds_min)?;
        check_finite_vec("helicopter.bounds_max", heli.bounds_max)?;
        check_finite_vec("helicopter.initial_heading", heli.initial_heading)?;
        if !heli.bounds().is_valid() {
            return Err(invalid("helicopter.bounds_min", "must not exceed helicopter.bounds_max"));
        }
        check_positive("helicopter.speed", heli.speed)?;
        check_smoothing("helicopter.smoothing", heli.smoothing)?;
        let (low, high) = heli.change_interval_ms;
        if !(low.is_finite() && high.is_finite() && low > 0.0 && low < high) {
            return Err(invalid(
                "helicopter.change_interval_ms",
                "needs finite 0 < low < high",
            ));
        }
        if !(heli.perturbation.is_finite() && heli.perturbation >= 0.0) {
            return Err(invalid("helicopter.perturbation", "must be finite and not negative"));
        }

        let cycle = &self.light_cycle;
        check_ordered("light_cycle.min", cycle.min, cycle.max, "must be below light_cycle.max")?;
        check_positive("light_cycle.step", cycle.step)?;
        check_positive("clicks.toggle_scale", self.clicks.toggle_scale)?;

        self.camera.validate()
    }
}

impl CameraConfig {
    /// Reject projections nalgebra cannot build and orbit limits that cannot clamp
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees.is_finite() && self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("camera.fov_degrees", "must be in (0, 180)"));
        }
        check_positive("camera.near", self.near)?;
        check_ordered("camera.near", self.near, self.far, "must be below camera.far")?;
        check_finite_vec("camera.target", self.target)?;
        check_finite_vec("camera.intro_from", self.intro_from)?;
        check_finite_vec("camera.intro_to", self.intro_to)?;
        if !(self.intro_delay_ms.is_finite() && self.intro_delay_ms >= 0.0) {
            return Err(invalid("camera.intro_delay_ms", "must be finite and not negative"));
        }
        check_positive("camera.intro_duration_ms", self.intro_duration_ms)?;
        check_smoothing("camera.orbit_damping", self.orbit_damping)?;
        check_positive("camera.orbit_min_distance", self.orbit_min_distance)?;
        if !(self.orbit_max_distance.is_finite() && self.orbit_max_distance >= self.orbit_min_distance) {
            return Err(invalid(
                "camera.orbit_max_distance",
                "must be finite and not below camera.orbit_min_distance",
            ));
        }
        if !(self.orbit_max_polar.is_finite()
            && self.orbit_max_polar > 0.0
            && self.orbit_max_polar <= constants::PI)
        {
            return Err(invalid("camera.orbit_max_polar", "must be in (0, PI]"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be a positive number"))
    }
}

fn check_ordered(field: &'static str, low: f32, high: f32, reason: &str) -> Result<(), ConfigError> {
    if low.is_finite() && high.is_finite() && low < high {
        Ok(())
    } else {
        Err(invalid(field, reason))
    }
}

fn check_finite_vec(field: &'static str, value: Vec3) -> Result<(), ConfigError> {
    if value.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(invalid(field, "must be finite on every axis"))
    }
}

fn check_smoothing(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be in (0, 1]"))
    }
}

/// Car loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarConfig {
    /// Spawn position
    pub spawn: Vec3,
    /// Uniform model scale
    pub scale: f32,
    /// West edge of the loop
    pub x_low: f32,
    /// East edge of the loop
    pub x_high: f32,
    /// South edge of the loop
    pub z_low: f32,
    /// North edge of the loop
    pub z_high: f32,
    /// Distance per tick
    pub speed: f32,
    /// Fraction of the remaining turn applied per tick
    pub smoothing: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(-15.0, 7.8, 25.3),
            scale: 1.4,
            x_low: -13.5,
            x_high: 28.3,
            z_low: -15.0,
            z_high: 25.3,
            speed: 0.1,
            smoothing: 0.05,
        }
    }
}

/// Helicopter patrol configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HelicopterConfig {
    /// Spawn position
    pub spawn: Vec3,
    /// Uniform model scale
    pub scale: f32,
    /// Lower corner of the patrol volume
    pub bounds_min: Vec3,
    /// Upper corner of the patrol volume
    pub bounds_max: Vec3,
    /// Heading before the first perturbation
    pub initial_heading: Vec3,
    /// Distance per tick
    pub speed: f32,
    /// Fraction of the remaining turn applied per tick
    pub smoothing: f32,
    /// Half-open range `[low, high)` of milliseconds between heading changes
    pub change_interval_ms: (f32, f32),
    /// Half-width of the uniform per-axis heading perturbation
    pub perturbation: f32,
    /// Fixed RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl HelicopterConfig {
    /// Patrol volume as a box
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.bounds_min, self.bounds_max)
    }
}

impl Default for HelicopterConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 40.0, 10.0),
            scale: 1.0,
            bounds_min: Vec3::new(-40.0, 30.0, -20.0),
            bounds_max: Vec3::new(25.0, 50.0, 50.0),
            initial_heading: Vec3::new(1.0, 0.0, 0.0),
            speed: 0.03,
            smoothing: 0.01,
            change_interval_ms: (3000.0, 3500.0),
            perturbation: 0.5,
            seed: None,
        }
    }
}

/// Light oscillator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightCycleConfig {
    /// Whether the sun moves at all
    pub enabled: bool,
    /// Axis of the sun position being swept
    pub axis: Axis,
    /// Lower bound of the sweep
    pub min: f32,
    /// Upper bound of the sweep
    pub max: f32,
    /// Distance per tick
    pub step: f32,
}

impl Default for LightCycleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            axis: Axis::X,
            min: -100.0,
            max: 100.0,
            step: 0.5,
        }
    }
}

/// Initial lighting values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient color as `0xRRGGBB`
    pub ambient_color: u32,
    /// Ambient intensity
    pub ambient_intensity: f32,
    /// Sun color as `0xRRGGBB`
    pub sun_color: u32,
    /// Sun intensity
    pub sun_intensity: f32,
    /// Sun position
    pub sun_position: Vec3,
    /// Background color as `0xRRGGBB`
    pub background_color: u32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x00a0_a0fc,
            ambient_intensity: 0.82,
            sun_color: 0x00e8_c37b,
            sun_intensity: 1.96,
            sun_position: Vec3::new(-69.0, 44.0, 14.0),
            background_color: 0x00c8_f0f9,
        }
    }
}

/// Camera and intro flight configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
    /// Initial viewport width in pixels
    pub width: u32,
    /// Initial viewport height in pixels
    pub height: u32,
    /// Point the camera looks at
    pub target: Vec3,
    /// Intro flight start
    pub intro_from: Vec3,
    /// Intro flight end
    pub intro_to: Vec3,
    /// Wait before the flight starts
    pub intro_delay_ms: f32,
    /// Flight duration
    pub intro_duration_ms: f32,
    /// Orbit damping once the intro completes
    pub orbit_damping: f32,
    /// Closest orbit distance
    pub orbit_min_distance: f32,
    /// Farthest orbit distance
    pub orbit_max_distance: f32,
    /// Largest polar angle in radians
    pub orbit_max_polar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            near: 1.0,
            far: 500.0,
            width: 1280,
            height: 720,
            target: Vec3::zeros(),
            intro_from: Vec3::new(50.0, 10.0, -35.0),
            intro_to: Vec3::new(0.0, 50.0, 40.0),
            intro_delay_ms: 1000.0,
            intro_duration_ms: 6500.0,
            orbit_damping: 0.04,
            orbit_min_distance: 20.0,
            orbit_max_distance: 5000.0,
            orbit_max_polar: constants::PI / 2.5,
        }
    }
}

/// Click rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Rules in priority order
    pub rules: Vec<ClickRule>,
    /// Scale factor applied to a node when its toggle rule first fires
    pub toggle_scale: f32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ClickRule::new(
                    "Fermata_bus_01_Color_0",
                    ClickAction::OpenUrl {
                        url: "https://www.example.com/city/bus-stop".to_string(),
                    },
                ),
                ClickRule::new(
                    "Object_206",
                    ClickAction::ToggleThenOpen {
                        url: "https://www.example.com/city/adopt-a-dog".to_string(),
                    },
                ),
            ],
            toggle_scale: 1.5,
        }
    }
}

/// Model locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    /// Static city model
    pub city: String,
    /// Car model
    pub car: String,
    /// Helicopter model
    pub helicopter: String,
    /// Dog model
    pub dog: String,
    /// Dog placement
    pub dog_spawn: Vec3,
    /// Dog scale
    pub dog_scale: f32,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            city: "models/gltf/city.glb".to_string(),
            car: "models/gltf/mersedes-benz_sl63_amg_free.glb".to_string(),
            helicopter: "models/gltf/helicopter.glb".to_string(),
            dog: "models/gltf/dog.glb".to_string(),
            dog_spawn: Vec3::new(5.0, 7.8, 12.0),
            dog_scale: 1.0,
        }
    }
}
