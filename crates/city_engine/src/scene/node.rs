//! Scene nodes
//!
//! A node is what a finished load produces: a named, posed, scaled object
//! with a picking radius. Movable actors are nodes whose [`Pose`] a motion
//! strategy rewrites every tick.

use crate::foundation::math::Vec3;

/// Position and heading of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position, world space for roots and parent-relative for parts
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f32,
}

impl Pose {
    /// Build a pose
    pub const fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 0.0), 0.0)
    }
}

/// A named object in the scene graph
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Canonical identity used by click rules
    pub name: String,
    /// Position and heading
    pub pose: Pose,
    /// Uniform scale
    pub scale: f32,
    /// Radius of the picking sphere, already scaled
    pub bounding_radius: f32,
}

impl SceneNode {
    /// Create a node
    pub fn new(name: impl Into<String>, pose: Pose, scale: f32, bounding_radius: f32) -> Self {
        Self {
            name: name.into(),
            pose,
            scale,
            bounding_radius,
        }
    }

    /// Resolve the one identity a node is known by.
    ///
    /// Model files carry a name on the node itself and sometimes a second
    /// one in user data; the user-data name wins when present and non-empty.
    pub fn canonical_name(node_name: &str, user_data_name: Option<&str>) -> String {
        match user_data_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => node_name.trim().to_string(),
        }
    }
}
