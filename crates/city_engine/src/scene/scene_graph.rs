//! Scene graph storage
//!
//! Nodes live in a slot map so keys stay valid while other nodes come and go.
//! The hierarchy is one level deep: model roots, and parts whose offsets
//! turn with the root's yaw. Root scale does not reach the parts.

use nalgebra::{Rotation3, Vector3};
use slotmap::{new_key_type, SlotMap};

use super::node::SceneNode;
use crate::foundation::math::Vec3;

new_key_type! {
    /// Key of a node in the [`SceneGraph`]
    pub struct NodeKey;
}

#[derive(Debug, Clone)]
struct Slot {
    node: SceneNode,
    parent: Option<NodeKey>,
}

/// Flat scene graph of roots and their parts
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, Slot>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model root together with its parts, returning the root key
    pub fn insert_model(&mut self, root: SceneNode, parts: Vec<SceneNode>) -> NodeKey {
        let root_key = self.nodes.insert(Slot { node: root, parent: None });
        for part in parts {
            self.nodes.insert(Slot {
                node: part,
                parent: Some(root_key),
            });
        }
        root_key
    }

    /// Number of nodes, parts included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when nothing has loaded yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key).map(|slot| &slot.node)
    }

    /// Mutably borrow a node
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key).map(|slot| &mut slot.node)
    }

    /// First node with the given canonical name
    pub fn find_by_name(&self, name: &str) -> Option<NodeKey> {
        self.nodes
            .iter()
            .find(|(_, slot)| slot.node.name == name)
            .map(|(key, _)| key)
    }

    /// World-space position of a node, following its parent's position and yaw
    pub fn world_position(&self, key: NodeKey) -> Option<Vec3> {
        let slot = self.nodes.get(key)?;
        let local = slot.node.pose.position;
        match slot.parent.and_then(|parent| self.nodes.get(parent)) {
            Some(parent) => {
                let turn = Rotation3::from_axis_angle(&Vector3::y_axis(), parent.node.pose.yaw);
                Some(parent.node.pose.position + turn * local)
            }
            None => Some(local),
        }
    }

    /// Keys of every node, in storage order
    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes.keys()
    }
}
