//! # City Engine
//!
//! Runtime core of an interactive 3D city scene: a car driving a fixed road
//! loop, a helicopter patrolling a box of sky, a sun sweeping back and forth,
//! and clickable landmarks that open external pages.
//!
//! Rendering and model decoding live outside this crate. What lives here is
//! everything that decides where things are and what a click does, driven
//! one frame at a time by [`FrameScheduler`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use city_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     city_engine::foundation::logging::init();
//!
//!     let config = CityConfig::load_or_default("city.toml")?;
//!     let mut scheduler = FrameScheduler::new(config)?;
//!     let mut loader = LatencyLoader::new(Duration::from_millis(250));
//!     scheduler.request_scene(&mut loader);
//!
//!     let mut clock = FixedClock::from_rate(60.0);
//!     for _ in 0..600 {
//!         let report = scheduler.tick(clock.tick());
//!         if let Some(step) = report.car {
//!             log::debug!("car on {:?}", step.zone);
//!         }
//!     }
//!
//!     let mut sink = RecordingSink::default();
//!     scheduler.handle_click(640.0, 360.0, &SphereRayCaster, &mut sink);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod camera;
pub mod config;
pub mod foundation;
pub mod lighting;
pub mod motion;
pub mod picking;
pub mod scene;

mod scheduler;

pub use scheduler::{FrameReport, FrameScheduler};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetLoader, LatencyLoader, LoadRequest, LoadedModel, ManualLoader, ModelPart, Placement},
        camera::{Camera, IntroFlight, IntroPhase, OrbitControls, OrbitLimits, Viewport},
        config::{CityConfig, Config, ConfigError},
        foundation::{
            math::{Aabb, Color, Vec2, Vec3},
            time::{Clock, FixedClock, FrameTimer},
        },
        lighting::{Axis, LightCycle, PanelError, PanelField, PanelValue, ParameterPanel, SceneLighting},
        motion::{PathFollower, PathStep, PatrolStep, PatrolWanderer, Zone},
        picking::{
            ClickAction, ClickDispatcher, ClickOutcome, ClickRule, ClickSink, Ray, RayCaster, RayHit,
            RecordingSink, SphereRayCaster,
        },
        scene::{ActorRole, ActorStatus, ActorTable, LoadEvent, NodeKey, Pose, SceneGraph, SceneNode},
        FrameReport, FrameScheduler,
    };
}
