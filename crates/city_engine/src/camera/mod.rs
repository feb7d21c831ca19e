//! # Camera
//!
//! Perspective camera, the viewport it projects into, the intro flight that
//! opens the scene and the orbit controls that take over afterwards.
//!
//! Conventions are right-handed and Y-up with OpenGL-style clip space, the
//! same as nalgebra's `new_perspective` and `look_at_rh`.

pub mod intro;
pub mod orbit;

pub use intro::{ease_in_out_quart, IntroFlight, IntroPhase};
pub use orbit::{OrbitControls, OrbitLimits};

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Point3, Vec3, Vec4};
use crate::picking::Ray;

/// Perspective camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Position in world space
    pub position: Vec3,
    /// Point looked at
    pub target: Vec3,
    /// Up hint, usually +Y
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Camera {
    /// Perspective camera at `position` looking at the origin
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Camera described by configuration, placed at the intro start
    pub fn from_config(config: &CameraConfig) -> Self {
        let aspect = Viewport::new(config.width, config.height).aspect();
        let mut camera = Self::perspective(config.intro_from, config.fov_degrees, aspect, config.near, config.far);
        camera.target = config.target;
        camera
    }

    /// Move the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Change the look-at point
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Update the aspect ratio after a resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if !aspect.is_finite() || aspect <= 0.0 {
            log::warn!("Ignoring invalid aspect ratio {}", aspect);
            return;
        }
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// View to clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// World to clip transform
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the camera through a point in normalized device coordinates.
    ///
    /// `ndc_y` points up. Returns `None` when the camera is degenerate (for
    /// instance target equal to position) and no inverse exists.
    pub fn screen_to_world_ray(&self, ndc_x: f32, ndc_y: f32) -> Option<Ray> {
        let inverse = self.view_projection_matrix().try_inverse()?;

        let unproject = |z: f32| -> Option<Vec3> {
            let h = inverse * Vec4::new(ndc_x, ndc_y, z, 1.0);
            if h.w.abs() <= f32::EPSILON {
                return None;
            }
            Some(h.xyz() / h.w)
        };
        let near = unproject(-1.0)?;
        let far = unproject(1.0)?;

        Ray::new(self.position, far - near)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

/// Output surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Viewport {
    /// Viewport of the given size; zero sizes are raised to one pixel
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Width over height
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Pixel position (origin top-left, y down) to NDC (origin center, y up)
    pub fn screen_to_ndc(&self, x: f32, y: f32) -> (f32, f32) {
        let ndc_x = x / self.width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - y / self.height as f32 * 2.0;
        (ndc_x, ndc_y)
    }

    /// Resize and push the new aspect ratio into `camera`
    pub fn resize(&mut self, width: u32, height: u32, camera: &mut Camera) {
        *self = Self::new(width, height);
        camera.set_aspect_ratio(self.aspect());
        log::debug!("Viewport resized to {}x{}", self.width, self.height);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let config = CameraConfig::default();
        Self::new(config.width, config.height)
    }
}
