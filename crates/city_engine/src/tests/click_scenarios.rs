//! Click handling through the scheduler, before and after models arrive

use crate::assets::{LoadedModel, ManualLoader, ModelPart};
use crate::config::CityConfig;
use crate::foundation::math::{Vec3, Vec4};
use crate::picking::{ClickOutcome, Ray, RayCaster, RayHit, RecordingSink, SphereRayCaster};
use crate::scene::SceneGraph;
use crate::scheduler::FrameScheduler;

const BUS: &str = "Fermata_bus_01_Color_0";
const DOG: &str = "Object_206";

/// Caster reporting a fixed list of names, nearest first, for whichever of
/// them are currently in the scene
struct ScriptedCaster(Vec<&'static str>);

impl RayCaster for ScriptedCaster {
    fn intersect(&self, _ray: &Ray, scene: &SceneGraph) -> Vec<RayHit> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, name)| {
                scene.find_by_name(name).map(|node| RayHit {
                    node,
                    distance: index as f32,
                })
            })
            .collect()
    }
}

fn city_model() -> LoadedModel {
    LoadedModel::new("city", 0.0).with_part(ModelPart::new(BUS, Vec3::new(-20.0, 8.0, 5.0), 1.5))
}

fn dog_model() -> LoadedModel {
    LoadedModel::new("dog", 1.0).with_part(ModelPart::new("mesh_0", Vec3::zeros(), 0.8).with_user_data_name(DOG))
}

fn loaded_scheduler() -> FrameScheduler {
    let mut config = CityConfig::default();
    config.helicopter.seed = Some(9);
    let mut scheduler = FrameScheduler::new(config).unwrap();
    let mut loader = ManualLoader::new();
    scheduler.request_scene(&mut loader);

    let paths = scheduler.config().assets.clone();
    loader.complete(&paths.city, &city_model()).unwrap();
    loader.complete(&paths.dog, &dog_model()).unwrap();
    scheduler.tick(0.016);
    scheduler
}

/// Pixel position of a world point as seen by the scheduler's camera
fn project(scheduler: &FrameScheduler, point: Vec3) -> (f32, f32) {
    let clip = scheduler.camera().view_projection_matrix() * Vec4::new(point.x, point.y, point.z, 1.0);
    let ndc = clip.xyz() / clip.w;
    let viewport = scheduler.viewport();
    let x = (ndc.x + 1.0) / 2.0 * viewport.width as f32;
    let y = (1.0 - ndc.y) / 2.0 * viewport.height as f32;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_before_dog_loads_does_nothing() {
        let mut config = CityConfig::default();
        config.helicopter.seed = Some(8);
        let mut scheduler = FrameScheduler::new(config).unwrap();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);
        scheduler.tick(0.016);

        let mut sink = RecordingSink::default();
        let outcome = scheduler.handle_click(640.0, 360.0, &ScriptedCaster(vec![DOG]), &mut sink);

        assert_eq!(outcome, ClickOutcome::Miss);
        assert!(sink.is_empty());
        assert!(!scheduler.clicks().is_toggled(DOG));
    }

    #[test]
    fn test_dog_toggle_scales_then_opens() {
        let mut scheduler = loaded_scheduler();
        let caster = ScriptedCaster(vec!["dog", DOG]);
        let mut sink = RecordingSink::default();

        let dog = scheduler.scene().find_by_name(DOG).unwrap();
        let scale_before = scheduler.scene().get(dog).unwrap().scale;

        let first = scheduler.handle_click(640.0, 360.0, &caster, &mut sink);
        assert_eq!(first, ClickOutcome::Toggled { target: DOG.to_string() });
        assert!(sink.opened.is_empty());
        let scale_after = scheduler.scene().get(dog).unwrap().scale;
        assert!((scale_after - scale_before * 1.5).abs() < 1e-6);

        // Motion ticks in between do not reset the toggle
        for _ in 0..10 {
            scheduler.tick(0.016);
        }

        let second = scheduler.handle_click(640.0, 360.0, &caster, &mut sink);
        assert!(matches!(second, ClickOutcome::Opened { ref target, .. } if target == DOG));
        assert_eq!(sink.opened.len(), 1);
        // Scale only changes on the toggle itself
        assert!((scheduler.scene().get(dog).unwrap().scale - scale_after).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_rule_wins() {
        let mut scheduler = loaded_scheduler();
        let mut sink = RecordingSink::default();

        let outcome = scheduler.handle_click(0.0, 0.0, &ScriptedCaster(vec![BUS, DOG]), &mut sink);

        assert!(matches!(outcome, ClickOutcome::Opened { ref target, .. } if target == BUS));
        assert_eq!(sink.opened.len(), 1);
        assert!(sink.toggled.is_empty());
        assert!(!scheduler.clicks().is_toggled(DOG));
    }

    #[test]
    fn test_real_pick_on_dog_after_intro() {
        let mut scheduler = loaded_scheduler();
        for _ in 0..80 {
            scheduler.tick(0.1);
        }

        let dog_center = scheduler.config().assets.dog_spawn;
        let (x, y) = project(&scheduler, dog_center);
        let mut sink = RecordingSink::default();

        let outcome = scheduler.handle_click(x, y, &SphereRayCaster, &mut sink);
        assert_eq!(outcome, ClickOutcome::Toggled { target: DOG.to_string() });
        assert_eq!(sink.toggled, vec![DOG.to_string()]);
    }

    #[test]
    fn test_real_pick_on_empty_sky_misses() {
        let mut scheduler = loaded_scheduler();
        for _ in 0..80 {
            scheduler.tick(0.1);
        }
        let mut sink = RecordingSink::default();

        // Top-left corner looks over the city into the sky
        let outcome = scheduler.handle_click(0.0, 0.0, &SphereRayCaster, &mut sink);
        assert_eq!(outcome, ClickOutcome::Miss);
        assert!(sink.is_empty());
    }
}
