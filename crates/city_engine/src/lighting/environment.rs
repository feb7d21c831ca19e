//! Live lighting state of the scene

use super::Axis;
use crate::config::LightingConfig;
use crate::foundation::math::{Color, Vec3};

/// Uniform ambient term
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Light color
    pub color: Color,
    /// Intensity multiplier
    pub intensity: f32,
}

/// Directional sun light.
///
/// The light shines from `position` toward the origin, so moving the position
/// moves the sun across the sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunLight {
    /// Light color
    pub color: Color,
    /// Intensity multiplier
    pub intensity: f32,
    /// Position the light shines from
    pub position: Vec3,
}

impl SunLight {
    /// Unit direction the light travels in
    pub fn direction(&self) -> Vec3 {
        (-self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, -1.0, 0.0))
    }

    /// One coordinate of the position
    pub fn coordinate(&self, axis: Axis) -> f32 {
        self.position[axis.index()]
    }

    /// Overwrite one coordinate of the position
    pub fn set_coordinate(&mut self, axis: Axis, value: f32) {
        self.position[axis.index()] = value;
    }
}

/// Everything the renderer needs to light the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    /// Ambient term
    pub ambient: AmbientLight,
    /// Sun
    pub sun: SunLight,
    /// Clear color behind the scene
    pub background: Color,
}

impl SceneLighting {
    /// Build the initial lighting from configuration
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::from_hex(config.ambient_color),
                intensity: config.ambient_intensity,
            },
            sun: SunLight {
                color: Color::from_hex(config.sun_color),
                intensity: config.sun_intensity,
                position: config.sun_position,
            },
            background: Color::from_hex(config.background_color),
        }
    }
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}
