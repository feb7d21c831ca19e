//! Actor table
//!
//! Each actor role owns one slot that starts pending when its model is
//! requested and becomes ready once the load lands in the scene graph.
//! Motion and click code ask the table whether a role is ready instead of
//! holding a possibly-missing reference of their own.

use std::collections::HashMap;
use std::fmt;

use super::scene_graph::{NodeKey, SceneGraph};
use crate::assets::{AssetError, LoadHandle, LoadPoll};

/// The scene objects the scheduler knows by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorRole {
    /// Static city model
    City,
    /// Car on the road loop
    Car,
    /// Patrolling helicopter
    Helicopter,
    /// Clickable dog
    Dog,
}

impl ActorRole {
    /// Every role, in request order
    pub const ALL: [Self; 4] = [Self::City, Self::Car, Self::Helicopter, Self::Dog];
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::City => "city",
            Self::Car => "car",
            Self::Helicopter => "helicopter",
            Self::Dog => "dog",
        };
        f.write_str(name)
    }
}

/// Load state of one role
#[derive(Debug)]
enum ActorSlot {
    Pending(LoadHandle),
    Ready(NodeKey),
    Failed,
}

/// Public view of a role's load state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorStatus {
    /// Never requested
    Absent,
    /// Requested, not finished
    Pending,
    /// In the scene graph
    Ready,
    /// Load failed; the role stays inactive
    Failed,
}

/// Something that happened to a role while polling loads
#[derive(Debug, Clone, PartialEq)]
pub enum LoadEvent {
    /// The role's model entered the scene graph
    Ready(ActorRole),
    /// The role's load failed
    Failed(ActorRole, AssetError),
}

/// Role to scene-node table
#[derive(Debug, Default)]
pub struct ActorTable {
    slots: HashMap<ActorRole, ActorSlot>,
}

impl ActorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a load for `role`, replacing whatever the role had before
    pub fn track(&mut self, role: ActorRole, handle: LoadHandle) {
        log::debug!("Tracking {} load of {}", role, handle.path());
        self.slots.insert(role, ActorSlot::Pending(handle));
    }

    /// Move every finished load into `graph`
    pub fn poll_loads(&mut self, graph: &mut SceneGraph) -> Vec<LoadEvent> {
        let mut events = Vec::new();
        for role in ActorRole::ALL {
            let Some(ActorSlot::Pending(handle)) = self.slots.get(&role) else {
                continue;
            };
            match handle.poll() {
                LoadPoll::Pending => {}
                LoadPoll::Ready(root, parts) => {
                    log::info!("{} loaded as '{}' with {} part(s)", role, root.name, parts.len());
                    let key = graph.insert_model(root, parts);
                    self.slots.insert(role, ActorSlot::Ready(key));
                    events.push(LoadEvent::Ready(role));
                }
                LoadPoll::Failed(error) => {
                    log::warn!("{} stays inactive: {}", role, error);
                    self.slots.insert(role, ActorSlot::Failed);
                    events.push(LoadEvent::Failed(role, error));
                }
            }
        }
        events
    }

    /// Scene key of a ready role
    pub fn ready(&self, role: ActorRole) -> Option<NodeKey> {
        match self.slots.get(&role) {
            Some(ActorSlot::Ready(key)) => Some(*key),
            _ => None,
        }
    }

    /// Whether the role's model is in the scene
    pub fn is_ready(&self, role: ActorRole) -> bool {
        self.ready(role).is_some()
    }

    /// Load state of a role
    pub fn status(&self, role: ActorRole) -> ActorStatus {
        match self.slots.get(&role) {
            None => ActorStatus::Absent,
            Some(ActorSlot::Pending(_)) => ActorStatus::Pending,
            Some(ActorSlot::Ready(_)) => ActorStatus::Ready,
            Some(ActorSlot::Failed) => ActorStatus::Failed,
        }
    }
}
