//! # Frame Scheduler
//!
//! Owns everything that changes from frame to frame and advances it in a
//! fixed order once per display refresh:
//!
//! 1. poll outstanding model loads into the scene graph
//! 2. advance the intro flight, then the orbit controls once it is done
//! 3. advance the light cycle (independent of any load)
//! 4. step the car, if its model is in the scene
//! 5. step the helicopter, if its model is in the scene
//!
//! Nothing in a tick returns an error. A feature whose actor is missing or
//! whose input is degenerate logs and sits the tick out.
//!
//! Clicks and resizes are handled between ticks against the same state, so
//! a click always sees a complete frame.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::{AssetLoader, LoadRequest, Placement};
use crate::camera::{Camera, IntroFlight, IntroPhase, OrbitControls, OrbitLimits, Viewport};
use crate::config::{CityConfig, ConfigError};
use crate::lighting::{
    Axis, LightCycle, PanelError, PanelField, PanelValue, ParameterPanel, SceneLighting,
};
use crate::motion::{PathFollower, PathStep, PatrolStep, PatrolWanderer};
use crate::picking::{ClickDispatcher, ClickOutcome, ClickSink, RayCaster};
use crate::scene::{ActorRole, ActorTable, LoadEvent, SceneGraph};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Index of the tick, starting at 0
    pub frame: u64,
    /// Loads that finished this tick
    pub load_events: Vec<LoadEvent>,
    /// Intro flight phase after this tick
    pub intro_phase: IntroPhase,
    /// Swept sun coordinate, when the light cycle is enabled
    pub sun_coordinate: Option<f32>,
    /// Car step, when the car is in the scene
    pub car: Option<PathStep>,
    /// Helicopter step, when the helicopter is in the scene
    pub helicopter: Option<PatrolStep>,
}

/// Per-frame driver of the city scene
#[derive(Debug)]
pub struct FrameScheduler<R: Rng = StdRng> {
    config: CityConfig,
    scene: SceneGraph,
    actors: ActorTable,
    car: PathFollower,
    helicopter: PatrolWanderer<R>,
    light_cycle: LightCycle,
    lighting: SceneLighting,
    panel: ParameterPanel,
    camera: Camera,
    viewport: Viewport,
    intro: IntroFlight,
    orbit: OrbitControls,
    clicks: ClickDispatcher,
    frame: u64,
}

impl FrameScheduler<StdRng> {
    /// Scheduler seeded from `helicopter.seed`, or from entropy when unset
    pub fn new(config: CityConfig) -> Result<Self, ConfigError> {
        let rng = match config.helicopter.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> FrameScheduler<R> {
    /// Scheduler using `rng` for the helicopter
    pub fn with_rng(config: CityConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let camera = Camera::from_config(&config.camera);
        let scheduler = Self {
            scene: SceneGraph::new(),
            actors: ActorTable::new(),
            car: PathFollower::from_config(&config.car),
            helicopter: PatrolWanderer::from_config(&config.helicopter, rng),
            light_cycle: LightCycle::from_config(&config.light_cycle),
            lighting: SceneLighting::from_config(&config.lighting),
            panel: ParameterPanel::new(),
            camera,
            viewport: Viewport::new(config.camera.width, config.camera.height),
            intro: IntroFlight::from_config(&config.camera),
            orbit: OrbitControls::new(OrbitLimits::from_config(&config.camera)),
            clicks: ClickDispatcher::from_config(&config.clicks),
            frame: 0,
            config,
        };
        log::info!(
            "Frame scheduler ready: {} click rule(s), light cycle on {:?}",
            scheduler.clicks.rules().len(),
            scheduler.config.light_cycle.axis
        );
        Ok(scheduler)
    }

    /// Start loading every actor model; returns immediately
    pub fn request_scene(&mut self, loader: &mut dyn AssetLoader) {
        for role in ActorRole::ALL {
            let request = self.load_request(role);
            log::info!("Requesting {} from {}", role, request.path);
            self.actors.track(role, loader.load(request));
        }
    }

    fn load_request(&self, role: ActorRole) -> LoadRequest {
        let paths = &self.config.assets;
        match role {
            ActorRole::City => LoadRequest::new(&paths.city, Placement::default()),
            ActorRole::Car => LoadRequest::new(
                &paths.car,
                Placement::at(self.config.car.spawn, self.config.car.scale),
            ),
            ActorRole::Helicopter => LoadRequest::new(
                &paths.helicopter,
                Placement::at(self.config.helicopter.spawn, self.config.helicopter.scale),
            ),
            ActorRole::Dog => LoadRequest::new(&paths.dog, Placement::at(paths.dog_spawn, paths.dog_scale)),
        }
    }

    /// Advance one frame, `delta_seconds` after the previous one
    pub fn tick(&mut self, delta_seconds: f32) -> FrameReport {
        let load_events = self.actors.poll_loads(&mut self.scene);
        let intro_phase = self.update_camera(delta_seconds);
        let sun_coordinate = self.update_light_cycle();

        let car = match self.actors.ready(ActorRole::Car).and_then(|key| self.scene.get_mut(key)) {
            Some(node) => Some(self.car.step(&mut node.pose)),
            None => None,
        };

        let helicopter = match self
            .actors
            .ready(ActorRole::Helicopter)
            .and_then(|key| self.scene.get_mut(key))
        {
            Some(node) => Some(self.helicopter.step(delta_seconds, &mut node.pose)),
            None => None,
        };

        let report = FrameReport {
            frame: self.frame,
            load_events,
            intro_phase,
            sun_coordinate,
            car,
            helicopter,
        };
        self.frame += 1;
        report
    }

    fn update_camera(&mut self, delta_seconds: f32) -> IntroPhase {
        if self.orbit.is_enabled() {
            self.orbit.update(&mut self.camera);
            return IntroPhase::Done;
        }

        let phase = self.intro.advance(delta_seconds);
        self.camera.set_position(self.intro.position());
        if phase == IntroPhase::Done {
            self.orbit.enable(&self.camera);
        }
        phase
    }

    fn update_light_cycle(&mut self) -> Option<f32> {
        if !self.config.light_cycle.enabled {
            return None;
        }
        let axis = self.config.light_cycle.axis;
        let coordinate = self.light_cycle.advance(self.lighting.sun.coordinate(axis));
        self.lighting.sun.set_coordinate(axis, coordinate);
        Some(coordinate)
    }

    /// Dispatch a click at pixel `(x, y)` against the current scene.
    ///
    /// When a toggle rule fires for the first time the toggled node is
    /// scaled by `clicks.toggle_scale`.
    pub fn handle_click(
        &mut self,
        x: f32,
        y: f32,
        caster: &dyn RayCaster,
        sink: &mut dyn ClickSink,
    ) -> ClickOutcome {
        let outcome = self
            .clicks
            .click(x, y, &self.camera, &self.viewport, &self.scene, caster, sink);

        if let ClickOutcome::Toggled { target } = &outcome {
            let factor = self.config.clicks.toggle_scale;
            if let Some(node) = self.scene.find_by_name(target).and_then(|key| self.scene.get_mut(key)) {
                node.scale *= factor;
                node.bounding_radius *= factor;
            }
        }
        outcome
    }

    /// Resize the output surface
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height, &mut self.camera);
    }

    /// Push a panel edit into the lighting state
    pub fn set_panel(&mut self, field: PanelField, value: PanelValue) -> Result<PanelValue, PanelError> {
        self.panel.set(&mut self.lighting, field, value)
    }

    /// Panel, for registering change callbacks
    pub fn panel_mut(&mut self) -> &mut ParameterPanel {
        &mut self.panel
    }

    /// Configuration the scheduler was built from
    pub const fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Scene graph
    pub const fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Actor load states
    pub const fn actors(&self) -> &ActorTable {
        &self.actors
    }

    /// Current lighting
    pub const fn lighting(&self) -> &SceneLighting {
        &self.lighting
    }

    /// Axis swept by the light cycle
    pub const fn light_axis(&self) -> Axis {
        self.config.light_cycle.axis
    }

    /// Camera
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Output surface
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Orbit controls, for feeding user input once the intro is done
    pub fn orbit_mut(&mut self) -> &mut OrbitControls {
        &mut self.orbit
    }

    /// Click rules and toggle state
    pub const fn clicks(&self) -> &ClickDispatcher {
        &self.clicks
    }

    /// Car path follower
    pub const fn car(&self) -> &PathFollower {
        &self.car
    }

    /// Helicopter wanderer
    pub const fn helicopter(&self) -> &PatrolWanderer<R> {
        &self.helicopter
    }

    /// Ticks run so far
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{LoadedModel, ManualLoader};
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn scheduler() -> FrameScheduler {
        let mut config = CityConfig::default();
        config.helicopter.seed = Some(1);
        FrameScheduler::new(config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = CityConfig::default();
        config.car.speed = -1.0;
        assert!(FrameScheduler::new(config).is_err());
    }

    #[test]
    fn test_rejects_configs_that_would_panic_later() {
        for text in [
            "[light_cycle]\nmin = nan\n",
            "[camera]\nnear = 5.0\nfar = 5.0\n",
            "[camera]\norbit_min_distance = nan\n",
        ] {
            let config: CityConfig = toml::from_str(text).unwrap();
            assert!(FrameScheduler::new(config).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn test_ticks_before_any_load() {
        let mut scheduler = scheduler();
        let report = scheduler.tick(0.016);

        assert_eq!(report.frame, 0);
        assert!(report.car.is_none());
        assert!(report.helicopter.is_none());
        // Light cycle runs without any model
        assert_relative_eq!(report.sun_coordinate.unwrap(), -68.5);
        assert_eq!(scheduler.frame_count(), 1);
    }

    #[test]
    fn test_car_moves_only_once_loaded() {
        let mut scheduler = scheduler();
        let mut loader = ManualLoader::new();
        scheduler.request_scene(&mut loader);

        scheduler.tick(0.016);
        let car_path = scheduler.config().assets.car.clone();
        loader.complete(&car_path, &LoadedModel::new("Car", 2.0)).unwrap();

        let report = scheduler.tick(0.016);
        assert_eq!(report.load_events, vec![LoadEvent::Ready(ActorRole::Car)]);
        let step = report.car.unwrap();
        assert!(!step.fallback);

        let key = scheduler.actors().ready(ActorRole::Car).unwrap();
        let pose = scheduler.scene().get(key).unwrap().pose;
        assert_relative_eq!(pose.position, Vec3::new(-14.9, 7.8, 25.3), epsilon = 1e-5);
        assert!(report.helicopter.is_none());
    }

    #[test]
    fn test_resize_changes_aspect() {
        let mut scheduler = scheduler();
        scheduler.resize(1000, 500);
        assert_relative_eq!(scheduler.camera().aspect, 2.0);
    }

    #[test]
    fn test_disabled_light_cycle_leaves_sun() {
        let mut config = CityConfig::default();
        config.light_cycle.enabled = false;
        config.helicopter.seed = Some(2);
        let mut scheduler = FrameScheduler::new(config).unwrap();
        let report = scheduler.tick(0.016);
        assert!(report.sun_coordinate.is_none());
        assert_relative_eq!(scheduler.lighting().sun.position.x, -69.0);
    }

    #[test]
    fn test_panel_edit_reaches_lighting() {
        let mut scheduler = scheduler();
        scheduler
            .set_panel(PanelField::AmbientIntensity, PanelValue::Number(3.0))
            .unwrap();
        assert_relative_eq!(scheduler.lighting().ambient.intensity, 3.0);
    }
}
