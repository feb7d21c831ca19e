//! Procedural motion strategies
//!
//! Each strategy owns whatever state it carries between ticks and rewrites
//! an actor's [`Pose`](crate::scene::Pose) once per tick. Strategies never
//! look actors up themselves; the scheduler hands them a pose only when the
//! actor's model has finished loading.

pub mod path_follower;
pub mod patrol_wanderer;

pub use path_follower::{LoopThresholds, PathFollower, PathStep, Zone};
pub use patrol_wanderer::{PatrolStep, PatrolWanderer};
