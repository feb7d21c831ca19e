//! Scheduler scenarios covering load timing, motion and the camera intro

use std::thread;
use std::time::Duration;

use crate::assets::{LatencyLoader, LoadedModel, ManualLoader};
use crate::camera::IntroPhase;
use crate::config::CityConfig;
use crate::motion::Zone;
use crate::scene::{ActorRole, ActorStatus, LoadEvent};
use crate::scheduler::FrameScheduler;

fn seeded_config(seed: u64) -> CityConfig {
    let mut config = CityConfig::default();
    config.helicopter.seed = Some(seed);
    config
}

fn complete_all(scheduler: &FrameScheduler, loader: &mut ManualLoader) {
    let paths = scheduler.config().assets.clone();
    loader.complete(&paths.city, &LoadedModel::new("city", 0.0)).unwrap();
    loader.complete(&paths.car, &LoadedModel::new("car", 2.0)).unwrap();
    loader
        .complete(&paths.helicopter, &LoadedModel::new("helicopter", 3.0))
        .unwrap();
    loader.complete(&paths.dog, &LoadedModel::new("dog", 1.0)).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_requested_once() {
        let mut scheduler = FrameScheduler::new(seeded_config(1)).unwrap();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);

        assert_eq!(loader.pending_paths().len(), ActorRole::ALL.len());
        for role in ActorRole::ALL {
            assert_eq!(scheduler.actors().status(role), ActorStatus::Pending);
        }
    }

    #[test]
    fn test_loads_land_between_ticks() {
        let mut scheduler = FrameScheduler::new(seeded_config(2)).unwrap();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);

        for _ in 0..10 {
            let report = scheduler.tick(0.016);
            assert!(report.car.is_none() && report.helicopter.is_none());
        }

        complete_all(&scheduler, &mut loader);
        let report = scheduler.tick(0.016);

        assert_eq!(report.load_events.len(), 4);
        assert!(report.car.is_some());
        assert!(report.helicopter.is_some());
        assert_eq!(scheduler.scene().len(), 4);
    }

    #[test]
    fn test_failed_load_keeps_other_features_running() {
        let mut scheduler = FrameScheduler::new(seeded_config(3)).unwrap();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);

        let paths = scheduler.config().assets.clone();
        loader.fail(&paths.helicopter, "truncated file").unwrap();
        loader.complete(&paths.car, &LoadedModel::new("car", 2.0)).unwrap();

        let report = scheduler.tick(0.016);
        assert!(report
            .load_events
            .iter()
            .any(|event| matches!(event, LoadEvent::Failed(ActorRole::Helicopter, _))));
        assert_eq!(scheduler.actors().status(ActorRole::Helicopter), ActorStatus::Failed);

        for _ in 0..100 {
            let report = scheduler.tick(0.016);
            assert!(report.car.is_some());
            assert!(report.helicopter.is_none());
            assert!(report.sun_coordinate.is_some());
        }
    }

    #[test]
    fn test_never_completing_load_is_harmless() {
        let mut scheduler = FrameScheduler::new(seeded_config(4)).unwrap();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);

        for _ in 0..1_000 {
            scheduler.tick(0.016);
        }
        assert_eq!(scheduler.actors().status(ActorRole::Car), ActorStatus::Pending);
        assert_eq!(scheduler.frame_count(), 1_000);
    }

    #[test]
    fn test_long_run_motion_stays_valid() {
        let config = seeded_config(5);
        let bounds = config.helicopter.bounds();
        let mut scheduler = FrameScheduler::new(config).unwrap();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);
        complete_all(&scheduler, &mut loader);

        let mut zones = Vec::new();
        for _ in 0..5_000 {
            let report = scheduler.tick(0.016);
            if let Some(step) = report.car {
                assert!(!step.fallback);
                if zones.last() != Some(&step.zone) {
                    zones.push(step.zone);
                }
            }

            let heli = scheduler.actors().ready(ActorRole::Helicopter).unwrap();
            let position = scheduler.scene().get(heli).unwrap().pose.position;
            assert!(bounds.contains_point(position));

            let sun = scheduler.lighting().sun.coordinate(scheduler.light_axis());
            assert!((-100.0..=100.0).contains(&sun));
        }

        // Perimeter is about 167 units at 0.1 per tick, so one full lap and more
        assert!(zones.len() >= 5);
        assert_eq!(&zones[..5], &[Zone::East, Zone::South, Zone::West, Zone::North, Zone::East]);
    }

    #[test]
    fn test_intro_hands_over_to_orbit() {
        let config = seeded_config(6);
        let end = config.camera.intro_to;
        let mut scheduler = FrameScheduler::new(config).unwrap();

        let mut phase = IntroPhase::Waiting;
        for _ in 0..100 {
            phase = scheduler.tick(0.1).intro_phase;
        }

        assert_eq!(phase, IntroPhase::Done);
        assert!(scheduler.orbit_mut().is_enabled());
        let camera = scheduler.camera();
        assert!((camera.position - end).norm() < 1e-2);
    }

    #[test]
    fn test_latency_loader_completes_on_later_tick() {
        let config = seeded_config(7);
        let paths = config.assets.clone();
        let mut loader = LatencyLoader::new(Duration::from_millis(5))
            .with_model(&paths.car, LoadedModel::new("car", 2.0));

        let mut scheduler = FrameScheduler::new(config).unwrap();
        scheduler.request_scene(&mut loader);

        let mut ready_after = None;
        for tick in 0..400 {
            scheduler.tick(0.016);
            if scheduler.actors().is_ready(ActorRole::Car) {
                ready_after = Some(tick);
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }

        assert!(ready_after.is_some(), "car never loaded");
        // Nothing else is in the catalog
        for _ in 0..400 {
            if scheduler.actors().status(ActorRole::Dog) == ActorStatus::Failed {
                break;
            }
            scheduler.tick(0.016);
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(scheduler.actors().status(ActorRole::Dog), ActorStatus::Failed);
    }
}
