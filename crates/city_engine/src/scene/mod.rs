//! Scene graph and actor bookkeeping

pub mod actors;
pub mod node;
pub mod scene_graph;

pub use actors::{ActorRole, ActorStatus, ActorTable, LoadEvent};
pub use node::{Pose, SceneNode};
pub use scene_graph::{NodeKey, SceneGraph};
