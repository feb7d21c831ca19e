//! Scene lighting
//!
//! The sun oscillator, the live lighting state it drives, and the parameter
//! panel that pushes user edits into that state.

use serde::{Deserialize, Serialize};

pub mod environment;
pub mod light_cycle;
pub mod panel;

pub use environment::{AmbientLight, SceneLighting, SunLight};
pub use light_cycle::LightCycle;
pub use panel::{FieldKind, PanelError, PanelField, PanelValue, ParameterPanel};

/// A world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// +X
    X,
    /// +Y
    Y,
    /// +Z
    Z,
}

impl Axis {
    /// Component index into a vector
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}
