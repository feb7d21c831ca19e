//! Asynchronous model loading
//!
//! A load is fire-and-forget: [`AssetLoader::load`] returns a [`LoadHandle`]
//! immediately and the result arrives over a channel. The frame scheduler
//! polls handles between ticks, so scene mutation stays on one thread even
//! when decoding does not. There is no cancellation and no timeout; a load
//! that never answers keeps its handle pending forever.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use super::AssetError;
use crate::foundation::math::Vec3;
use crate::scene::{Pose, SceneNode};

/// Where a loaded model is placed in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// World position of the model root
    pub position: Vec3,
    /// Uniform scale
    pub scale: f32,
    /// Initial yaw in radians
    pub yaw: f32,
}

impl Placement {
    /// Place at `position` with uniform `scale` and no rotation
    pub const fn at(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale,
            yaw: 0.0,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::at(Vec3::new(0.0, 0.0, 0.0), 1.0)
    }
}

/// A request to load one model
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRequest {
    /// Model path
    pub path: String,
    /// Placement applied to the root once loaded
    pub placement: Placement,
}

impl LoadRequest {
    /// Build a request
    pub fn new(path: impl Into<String>, placement: Placement) -> Self {
        Self {
            path: path.into(),
            placement,
        }
    }

    /// Turn a decoded model into scene nodes using this request's placement.
    ///
    /// Returns the root node followed by its parts. Part offsets are scaled
    /// by the placement scale.
    pub fn instantiate(&self, model: &LoadedModel) -> (SceneNode, Vec<SceneNode>) {
        let scale = self.placement.scale;
        let root = SceneNode::new(
            SceneNode::canonical_name(&model.name, model.user_data_name.as_deref()),
            Pose::new(self.placement.position, self.placement.yaw),
            scale,
            model.bounding_radius * scale,
        );
        let parts = model
            .parts
            .iter()
            .map(|part| {
                SceneNode::new(
                    SceneNode::canonical_name(&part.name, part.user_data_name.as_deref()),
                    Pose::new(part.offset * scale, 0.0),
                    scale,
                    part.bounding_radius * scale,
                )
            })
            .collect();
        (root, parts)
    }
}

/// A named sub-object of a model that can be clicked on its own
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPart {
    /// Node name from the model file
    pub name: String,
    /// Name stored in the node's user data, if any
    pub user_data_name: Option<String>,
    /// Offset from the model root, unscaled
    pub offset: Vec3,
    /// Picking radius, unscaled
    pub bounding_radius: f32,
}

impl ModelPart {
    /// Part with a plain node name
    pub fn new(name: impl Into<String>, offset: Vec3, bounding_radius: f32) -> Self {
        Self {
            name: name.into(),
            user_data_name: None,
            offset,
            bounding_radius,
        }
    }

    /// Attach a user-data name, which takes precedence as the part's identity
    #[must_use]
    pub fn with_user_data_name(mut self, name: impl Into<String>) -> Self {
        self.user_data_name = Some(name.into());
        self
    }
}

/// What a decoder produces for one model file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    /// Root node name
    pub name: String,
    /// Root user-data name, if any
    pub user_data_name: Option<String>,
    /// Picking radius of the whole model, unscaled
    pub bounding_radius: f32,
    /// Clickable sub-objects
    pub parts: Vec<ModelPart>,
}

impl LoadedModel {
    /// Model with no separately clickable parts
    pub fn new(name: impl Into<String>, bounding_radius: f32) -> Self {
        Self {
            name: name.into(),
            user_data_name: None,
            bounding_radius,
            parts: Vec::new(),
        }
    }

    /// Add a clickable part
    #[must_use]
    pub fn with_part(mut self, part: ModelPart) -> Self {
        self.parts.push(part);
        self
    }
}

type LoadResult = Result<(SceneNode, Vec<SceneNode>), AssetError>;

/// Result of polling a [`LoadHandle`]
#[derive(Debug)]
pub enum LoadPoll {
    /// Still loading
    Pending,
    /// Finished: root node and its parts
    Ready(SceneNode, Vec<SceneNode>),
    /// Finished without a model
    Failed(AssetError),
}

/// Handle to an in-flight load
#[derive(Debug)]
pub struct LoadHandle {
    path: String,
    receiver: Receiver<LoadResult>,
}

impl LoadHandle {
    fn channel(path: &str) -> (Sender<LoadResult>, Self) {
        let (sender, receiver) = mpsc::channel();
        (
            sender,
            Self {
                path: path.to_string(),
                receiver,
            },
        )
    }

    /// Path this handle is loading
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Check for completion without blocking
    pub fn poll(&self) -> LoadPoll {
        match self.receiver.try_recv() {
            Ok(Ok((root, parts))) => LoadPoll::Ready(root, parts),
            Ok(Err(error)) => LoadPoll::Failed(error),
            Err(TryRecvError::Empty) => LoadPoll::Pending,
            Err(TryRecvError::Disconnected) => LoadPoll::Failed(AssetError::Abandoned {
                path: self.path.clone(),
            }),
        }
    }
}

/// Something that can start model loads
pub trait AssetLoader {
    /// Start loading; the returned handle completes later
    fn load(&mut self, request: LoadRequest) -> LoadHandle;
}

/// Loader whose completions are triggered explicitly.
///
/// Used by tests and scripted runs to decide exactly which tick a model
/// becomes available on.
#[derive(Debug, Default)]
pub struct ManualLoader {
    pending: Vec<(LoadRequest, Sender<LoadResult>)>,
}

impl ManualLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths requested but not yet completed, oldest first
    pub fn pending_paths(&self) -> Vec<&str> {
        self.pending.iter().map(|(request, _)| request.path.as_str()).collect()
    }

    /// Complete the oldest pending request for `path` with `model`
    pub fn complete(&mut self, path: &str, model: &LoadedModel) -> Result<(), AssetError> {
        let (request, sender) = self.take(path)?;
        // A dropped handle just means nobody is waiting any more
        let _ = sender.send(Ok(request.instantiate(model)));
        Ok(())
    }

    /// Fail the oldest pending request for `path`
    pub fn fail(&mut self, path: &str, reason: impl Into<String>) -> Result<(), AssetError> {
        let (request, sender) = self.take(path)?;
        let _ = sender.send(Err(AssetError::Decode {
            path: request.path,
            reason: reason.into(),
        }));
        Ok(())
    }

    fn take(&mut self, path: &str) -> Result<(LoadRequest, Sender<LoadResult>), AssetError> {
        let index = self
            .pending
            .iter()
            .position(|(request, _)| request.path == path)
            .ok_or_else(|| AssetError::NotRequested {
                path: path.to_string(),
            })?;
        Ok(self.pending.remove(index))
    }
}

impl AssetLoader for ManualLoader {
    fn load(&mut self, request: LoadRequest) -> LoadHandle {
        log::debug!("Queued manual load of {}", request.path);
        let (sender, handle) = LoadHandle::channel(&request.path);
        self.pending.push((request, sender));
        handle
    }
}

/// Loader that answers from a model catalog on a background thread after a
/// fixed latency, standing in for download plus decode.
#[derive(Debug, Clone, Default)]
pub struct LatencyLoader {
    latency: Duration,
    catalog: Vec<(String, LoadedModel)>,
}

impl LatencyLoader {
    /// Loader answering after `latency`
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            catalog: Vec::new(),
        }
    }

    /// Register the model served for `path`
    #[must_use]
    pub fn with_model(mut self, path: impl Into<String>, model: LoadedModel) -> Self {
        self.catalog.push((path.into(), model));
        self
    }

    fn lookup(&self, path: &str) -> Option<LoadedModel> {
        self.catalog
            .iter()
            .find(|(known, _)| known == path)
            .map(|(_, model)| model.clone())
    }
}

impl AssetLoader for LatencyLoader {
    fn load(&mut self, request: LoadRequest) -> LoadHandle {
        let (sender, handle) = LoadHandle::channel(&request.path);
        let model = self.lookup(&request.path);
        let latency = self.latency;

        log::debug!("Loading {} with {:?} latency", request.path, latency);
        thread::spawn(move || {
            thread::sleep(latency);
            let result = model
                .map(|model| request.instantiate(&model))
                .ok_or(AssetError::NotFound { path: request.path });
            let _ = sender.send(result);
        });

        handle
    }
}
