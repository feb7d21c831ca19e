//! Click picking
//!
//! Screen clicks become world rays, rays become an ordered hit list, and the
//! hit list is matched against click rules.

pub mod caster;
pub mod dispatcher;
pub mod ray;

pub use caster::{RayCaster, SphereRayCaster};
pub use dispatcher::{ClickAction, ClickDispatcher, ClickOutcome, ClickRule, ClickSink, RecordingSink};
pub use ray::{BoundingSphere, Ray, RayHit};
