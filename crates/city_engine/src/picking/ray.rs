//! Rays and bounding spheres

use crate::foundation::math::Vec3;
use crate::scene::NodeKey;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, or `None` when `direction` has no usable length
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let finite = |v: &Vec3| v.iter().all(|c| c.is_finite());
        if !finite(&origin) || !finite(&direction) {
            return None;
        }
        let direction = direction.try_normalize(f32::EPSILON)?;
        Some(Self { origin, direction })
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One object under a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Node that was hit
    pub node: NodeKey,
    /// Distance from the ray origin to the entry point
    pub distance: f32,
}

/// Sphere used as a picking proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center in world space
    pub center: Vec3,
    /// Radius
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a sphere
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along `ray` to the first point on the sphere.
    ///
    /// A ray starting inside the sphere hits at its exit point. Spheres
    /// entirely behind the origin are missed.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        if self.radius <= 0.0 {
            return None;
        }

        // |origin + t*direction - center|^2 = radius^2 with a unit direction
        let oc = ray.origin - self.center;
        let b = oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_ray() {
        assert!(Ray::new(Vec3::zeros(), Vec3::zeros()).is_none());
        assert!(Ray::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::x()).is_none());
        assert!(Ray::new(Vec3::zeros(), Vec3::new(0.0, f32::NAN, 1.0)).is_none());
    }

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(ray.point_at(2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn test_sphere_hit_distance() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0);
        assert_relative_eq!(sphere.intersect_ray(&ray).unwrap(), 8.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_miss_and_behind() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let off_axis = BoundingSphere::new(Vec3::new(5.0, 0.0, -10.0), 2.0);
        let behind = BoundingSphere::new(Vec3::new(0.0, 0.0, 10.0), 2.0);
        assert!(off_axis.intersect_ray(&ray).is_none());
        assert!(behind.intersect_ray(&ray).is_none());
    }

    #[test]
    fn test_origin_inside_sphere() {
        let ray = Ray::new(Vec3::zeros(), Vec3::x()).unwrap();
        let sphere = BoundingSphere::new(Vec3::zeros(), 3.0);
        assert_relative_eq!(sphere.intersect_ray(&ray).unwrap(), 3.0, epsilon = 1e-5);
    }
}
