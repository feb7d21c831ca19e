//! Ray casting against the scene graph

use super::ray::{BoundingSphere, Ray, RayHit};
use crate::scene::SceneGraph;

/// Produces the nodes under a ray, nearest first
pub trait RayCaster {
    /// Every node `ray` hits, sorted by increasing distance
    fn intersect(&self, ray: &Ray, scene: &SceneGraph) -> Vec<RayHit>;
}

/// Casts against each node's bounding sphere.
///
/// Nodes with a non-positive radius are not pickable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphereRayCaster;

impl RayCaster for SphereRayCaster {
    fn intersect(&self, ray: &Ray, scene: &SceneGraph) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = scene
            .keys()
            .filter_map(|key| {
                let node = scene.get(key)?;
                let center = scene.world_position(key)?;
                let distance = BoundingSphere::new(center, node.bounding_radius).intersect_ray(ray)?;
                Some(RayHit { node: key, distance })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::{Pose, SceneNode};

    fn node(name: &str, position: Vec3, radius: f32) -> SceneNode {
        SceneNode::new(name, Pose::new(position, 0.0), 1.0, radius)
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let mut scene = SceneGraph::new();
        let far = scene.insert_model(node("far", Vec3::new(0.0, 0.0, -30.0), 1.0), Vec::new());
        let near = scene.insert_model(node("near", Vec3::new(0.0, 0.0, -10.0), 1.0), Vec::new());
        scene.insert_model(node("aside", Vec3::new(10.0, 0.0, -10.0), 1.0), Vec::new());

        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let hits = SphereRayCaster.intersect(&ray, &scene);

        let order: Vec<_> = hits.iter().map(|hit| hit.node).collect();
        assert_eq!(order, vec![near, far]);
    }

    #[test]
    fn test_parts_use_world_position() {
        let mut scene = SceneGraph::new();
        let root = node("root", Vec3::new(0.0, 0.0, -20.0), 0.0);
        let part = node("part", Vec3::new(5.0, 0.0, 0.0), 1.0);
        scene.insert_model(root, vec![part]);

        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).unwrap();
        let hits = SphereRayCaster.intersect(&ray, &scene);
        assert_eq!(hits.len(), 1);
        assert_eq!(scene.get(hits[0].node).unwrap().name, "part");
    }

    #[test]
    fn test_empty_scene() {
        let ray = Ray::new(Vec3::zeros(), Vec3::x()).unwrap();
        assert!(SphereRayCaster.intersect(&ray, &SceneGraph::new()).is_empty());
    }
}
