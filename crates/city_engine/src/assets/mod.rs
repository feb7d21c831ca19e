//! Asset loading
//!
//! Model decoding happens outside this crate. What the scene needs is a
//! request that completes at some later tick with a positioned, named node,
//! and a handle it can poll without blocking. [`AssetLoader`] is that seam.

pub mod loader;

pub use loader::{
    AssetLoader, LatencyLoader, LoadHandle, LoadPoll, LoadRequest, LoadedModel, ManualLoader,
    ModelPart, Placement,
};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The loader has no model at this path
    #[error("Asset not found: {path}")]
    NotFound {
        /// Requested path
        path: String,
    },

    /// The model exists but could not be decoded
    #[error("Failed to decode {path}: {reason}")]
    Decode {
        /// Requested path
        path: String,
        /// Decoder message
        reason: String,
    },

    /// The loader went away before answering
    #[error("Load of {path} was abandoned")]
    Abandoned {
        /// Requested path
        path: String,
    },

    /// Completion was reported for a path nobody asked for
    #[error("No pending request for {path}")]
    NotRequested {
        /// Path passed to the completion call
        path: String,
    },
}
