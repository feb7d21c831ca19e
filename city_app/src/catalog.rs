//! Stand-in model catalog
//!
//! The headless app has no decoder, so each configured path is served a
//! lightweight model carrying the named parts the click rules look for.

use std::time::Duration;

use city_engine::assets::{LatencyLoader, LoadedModel, ModelPart};
use city_engine::config::AssetPaths;
use city_engine::foundation::math::Vec3;

/// Loader serving every configured model after `latency`
pub fn demo_loader(paths: &AssetPaths, latency: Duration) -> LatencyLoader {
    LatencyLoader::new(latency)
        .with_model(&paths.city, city())
        .with_model(&paths.car, LoadedModel::new("mersedes_benz_sl63", 2.5))
        .with_model(&paths.helicopter, LoadedModel::new("helicopter", 4.0))
        .with_model(&paths.dog, dog())
}

fn city() -> LoadedModel {
    LoadedModel::new("Sketchfab_Scene", 0.0)
        .with_part(ModelPart::new("Fermata_bus_01_Color_0", Vec3::new(-20.0, 8.0, 5.0), 1.5))
        .with_part(ModelPart::new("Palazzo_03", Vec3::new(10.0, 15.0, -30.0), 8.0))
}

fn dog() -> LoadedModel {
    LoadedModel::new("dog", 0.0)
        .with_part(ModelPart::new("mesh_0", Vec3::new(0.0, 0.5, 0.0), 1.0).with_user_data_name("Object_206"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use city_engine::assets::{AssetLoader, LoadPoll, LoadRequest, Placement};

    #[test]
    fn test_dog_part_uses_user_data_name() {
        let paths = AssetPaths::default();
        let mut loader = demo_loader(&paths, Duration::ZERO);
        let handle = loader.load(LoadRequest::new(&paths.dog, Placement::default()));

        let mut result = handle.poll();
        for _ in 0..200 {
            if !matches!(result, LoadPoll::Pending) {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
            result = handle.poll();
        }

        match result {
            LoadPoll::Ready(_, parts) => assert_eq!(parts[0].name, "Object_206"),
            other => panic!("dog did not load: {other:?}"),
        }
    }
}
