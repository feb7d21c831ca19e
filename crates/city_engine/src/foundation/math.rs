//! Math utilities and types
//!
//! Provides the vector aliases and angle helpers shared by the motion,
//! lighting and picking modules. Scene space is right-handed and Y-up;
//! yaw is a rotation about +Y.

use serde::{Deserialize, Serialize};

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle difference into `[-PI, PI]`.
    ///
    /// Applies repeated `±2PI` corrections, so inputs already in range come
    /// back untouched (including exactly `PI`). Non-finite input yields `0.0`.
    pub fn wrap_angle(mut radians: f32) -> f32 {
        if !radians.is_finite() {
            return 0.0;
        }
        while radians > constants::PI {
            radians -= constants::TAU;
        }
        while radians < -constants::PI {
            radians += constants::TAU;
        }
        radians
    }

    /// Yaw that faces along `direction` on the XZ plane.
    ///
    /// `offset` accounts for the model's forward axis: `PI` for assets that
    /// face -Z at rest, `1.5 * PI` for assets that face +X.
    pub fn yaw_towards(direction_x: f32, direction_z: f32, offset: f32) -> f32 {
        (-direction_x).atan2(-direction_z) + offset
    }

    /// Move `current` a fraction `alpha` of the shortest way toward `desired`.
    ///
    /// First-order smoothing: the step never exceeds `alpha * PI` and never
    /// overshoots for `alpha` in `(0, 1]`.
    pub fn smooth_yaw(current: f32, desired: f32, alpha: f32) -> f32 {
        current + wrap_angle(desired - current) * alpha
    }

    /// Normalize `vector`, or return `fallback` when it has no direction.
    pub fn normalize_or(vector: Vec3, fallback: Vec3) -> Vec3 {
        if vector.iter().all(|c| c.is_finite()) {
            vector.try_normalize(f32::EPSILON).unwrap_or(fallback)
        } else {
            fallback
        }
    }

    /// Normalize a planar vector, or return `fallback` when it has no direction.
    pub fn normalize_or_2d(vector: Vec2, fallback: Vec2) -> Vec2 {
        if vector.iter().all(|c| c.is_finite()) {
            vector.try_normalize(f32::EPSILON).unwrap_or(fallback)
        } else {
            fallback
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Check if this box contains a point (inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }

    /// Clamp a point into the box on every axis
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// `true` when every axis has `min <= max`
    pub fn is_valid(&self) -> bool {
        (0..3).all(|axis| self.min[axis] <= self.max[axis])
    }
}

/// RGB color stored as linear floats in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Build a color from a `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Pack back into `0xRRGGBB`
    pub fn to_hex(self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Channels as a vector
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::constants::{PI, TAU};
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_angle_range() {
        for step in -40..=40 {
            let angle = step as f32 * 0.77;
            let wrapped = wrap_angle(angle);
            assert!((-PI..=PI).contains(&wrapped), "{angle} wrapped to {wrapped}");
            assert_relative_eq!(wrapped.sin(), angle.sin(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_wrap_angle_keeps_in_range_values() {
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), -PI);
        assert_eq!(wrap_angle(0.25), 0.25);
        assert_relative_eq!(wrap_angle(TAU + 0.5), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_wrap_angle_non_finite() {
        assert_eq!(wrap_angle(f32::NAN), 0.0);
        assert_eq!(wrap_angle(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_smooth_yaw_takes_short_way() {
        // 350 degrees away clockwise is 10 degrees the other way
        let current = deg_to_rad(5.0);
        let desired = deg_to_rad(355.0);
        let next = smooth_yaw(current, desired, 0.5);
        assert_relative_eq!(next, deg_to_rad(0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_smooth_yaw_step_bound() {
        let alpha = 0.05;
        for step in -20..=20 {
            let desired = step as f32 * 1.3;
            let next = smooth_yaw(0.4, desired, alpha);
            assert!((next - 0.4).abs() <= alpha * PI + 1e-6);
        }
    }

    #[test]
    fn test_yaw_towards_axes() {
        // Facing -Z with offset PI gives yaw PI + 0 == PI
        assert_relative_eq!(yaw_towards(0.0, -1.0, PI), PI, epsilon = 1e-6);
        assert_relative_eq!(yaw_towards(1.0, 0.0, PI), PI - PI / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_or_fallback() {
        let fallback = Vec3::x();
        assert_eq!(normalize_or(Vec3::zeros(), fallback), fallback);
        assert_eq!(normalize_or(Vec3::new(f32::NAN, 0.0, 0.0), fallback), fallback);
        assert_relative_eq!(normalize_or(Vec3::new(0.0, 3.0, 4.0), fallback).norm(), 1.0);
    }

    #[test]
    fn test_aabb_clamp() {
        let bounds = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 2.0, 1.0));
        let clamped = bounds.clamp_point(Vec3::new(5.0, -3.0, 0.5));
        assert_eq!(clamped, Vec3::new(1.0, 0.0, 0.5));
        assert!(bounds.contains_point(clamped));
        assert!(bounds.is_valid());
    }

    #[test]
    fn test_color_hex() {
        let sun = Color::from_hex(0xe8c37b);
        assert_eq!(sun.to_hex(), 0xe8c37b);
        assert_relative_eq!(sun.r, 232.0 / 255.0);
    }
}
