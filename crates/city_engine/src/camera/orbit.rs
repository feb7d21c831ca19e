//! Orbit controls
//!
//! Spherical-coordinate orbit around a target with damped rotation and
//! zoom. Polar angle is measured from +Y, azimuth around +Y from +Z.

use crate::config::CameraConfig;
use crate::foundation::math::Vec3;

use super::Camera;

const MIN_POLAR: f32 = 1e-4;

/// Limits applied while orbiting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    /// Fraction of the remaining velocity removed per update
    pub damping: f32,
    /// Closest distance to the target
    pub min_distance: f32,
    /// Farthest distance from the target
    pub max_distance: f32,
    /// Largest polar angle, keeping the camera above the ground
    pub max_polar: f32,
}

impl OrbitLimits {
    /// Limits from configuration
    pub const fn from_config(config: &CameraConfig) -> Self {
        Self {
            damping: config.orbit_damping,
            min_distance: config.orbit_min_distance,
            max_distance: config.orbit_max_distance,
            max_polar: config.orbit_max_polar,
        }
    }
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

/// Damped orbit camera controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    enabled: bool,
    limits: OrbitLimits,
    target: Vec3,
    azimuth: f32,
    polar: f32,
    distance: f32,
    azimuth_velocity: f32,
    polar_velocity: f32,
    zoom_velocity: f32,
}

impl OrbitControls {
    /// Disabled controls around the origin
    pub fn new(limits: OrbitLimits) -> Self {
        Self {
            enabled: false,
            limits,
            target: Vec3::zeros(),
            azimuth: 0.0,
            polar: limits.max_polar,
            distance: limits.min_distance,
            azimuth_velocity: 0.0,
            polar_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }

    /// Whether user input moves the camera
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current limits
    pub const fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// Distance from the target
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    /// Polar angle from +Y
    pub const fn polar(&self) -> f32 {
        self.polar
    }

    /// Take over from wherever `camera` currently is
    pub fn enable(&mut self, camera: &Camera) {
        self.target = camera.target;
        let offset = camera.position - camera.target;
        let distance = offset.norm();
        if distance > f32::EPSILON {
            self.azimuth = offset.x.atan2(offset.z);
            self.polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        }
        self.distance = distance;
        self.enabled = true;
        log::info!("Orbit controls enabled at distance {:.1}", distance);
    }

    /// Stop reacting to input and drop pending motion
    pub fn disable(&mut self) {
        self.enabled = false;
        self.azimuth_velocity = 0.0;
        self.polar_velocity = 0.0;
        self.zoom_velocity = 0.0;
    }

    /// Queue a rotation in radians
    pub fn rotate(&mut self, delta_azimuth: f32, delta_polar: f32) {
        if self.enabled {
            self.azimuth_velocity += delta_azimuth;
            self.polar_velocity += delta_polar;
        }
    }

    /// Queue a zoom; positive values move away from the target
    pub fn zoom(&mut self, delta_distance: f32) {
        if self.enabled {
            self.zoom_velocity += delta_distance;
        }
    }

    /// Apply damped motion and limits, writing the result into `camera`.
    ///
    /// Returns `false` without touching the camera while disabled.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        if !self.enabled {
            return false;
        }

        let damping = self.limits.damping.clamp(0.0, 1.0);
        self.azimuth += self.azimuth_velocity * damping;
        self.polar += self.polar_velocity * damping;
        self.distance += self.zoom_velocity * damping;
        self.azimuth_velocity *= 1.0 - damping;
        self.polar_velocity *= 1.0 - damping;
        self.zoom_velocity *= 1.0 - damping;

        self.polar = self.polar.clamp(MIN_POLAR, self.limits.max_polar.max(MIN_POLAR));
        self.distance = self
            .distance
            .clamp(self.limits.min_distance, self.limits.max_distance.max(self.limits.min_distance));

        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        let offset = Vec3::new(sin_polar * sin_azimuth, cos_polar, sin_polar * cos_azimuth) * self.distance;

        camera.target = self.target;
        camera.set_position(self.target + offset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera_at(position: Vec3) -> Camera {
        let mut camera = Camera::default();
        camera.position = position;
        camera.target = Vec3::zeros();
        camera
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut controls = OrbitControls::new(OrbitLimits::default());
        let mut camera = camera_at(Vec3::new(0.0, 50.0, 40.0));
        let before = camera;

        controls.rotate(1.0, 1.0);
        assert!(!controls.update(&mut camera));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_enable_keeps_camera_in_place() {
        let mut controls = OrbitControls::new(OrbitLimits::default());
        let mut camera = camera_at(Vec3::new(0.0, 50.0, 40.0));

        controls.enable(&camera);
        assert!(controls.update(&mut camera));
        assert_relative_eq!(camera.position, Vec3::new(0.0, 50.0, 40.0), epsilon = 1e-3);
    }

    #[test]
    fn test_polar_and_distance_limits() {
        let limits = OrbitLimits::default();
        let mut controls = OrbitControls::new(limits);
        let mut camera = camera_at(Vec3::new(0.0, 50.0, 40.0));
        controls.enable(&camera);

        controls.rotate(0.0, 1_000.0);
        controls.zoom(-1_000_000.0);
        for _ in 0..200 {
            controls.update(&mut camera);
        }

        assert!(controls.polar() <= limits.max_polar + 1e-6);
        assert_relative_eq!(controls.distance(), limits.min_distance);
        // Never below the ground plane at the max polar angle
        assert!(camera.position.y > 0.0);
    }

    #[test]
    fn test_damping_settles() {
        let mut controls = OrbitControls::new(OrbitLimits::default());
        let mut camera = camera_at(Vec3::new(0.0, 50.0, 40.0));
        controls.enable(&camera);

        controls.rotate(0.5, 0.0);
        let mut last = camera.position;
        let mut last_step = f32::MAX;
        for _ in 0..50 {
            controls.update(&mut camera);
            let step = (camera.position - last).norm();
            assert!(step <= last_step + 1e-4);
            last_step = step;
            last = camera.position;
        }
    }
}
