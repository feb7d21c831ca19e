//! # Lighting parameter panel
//!
//! A headless model of the lighting tweak panel: a fixed set of labelled
//! fields, each bound to one value of [`SceneLighting`]. Numeric edits are
//! clamped to the field's range, color edits take `0xRRGGBB`. Every accepted
//! edit is written into the lighting state and then reported to the
//! callbacks registered for that field. Data flows one way only: the panel
//! never reads back changes made elsewhere except through [`ParameterPanel::value`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use super::{Axis, SceneLighting};
use crate::foundation::math::Color;

/// Errors produced by panel edits
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PanelError {
    /// No field carries this label
    #[error("Unknown panel field '{0}'")]
    UnknownField(String),

    /// A number was sent to a color field or the other way round
    #[error("Field '{field}' expects a {expected} value")]
    KindMismatch {
        /// Field that rejected the edit
        field: PanelField,
        /// Kind the field accepts
        expected: &'static str,
    },

    /// NaN or infinite numeric edit
    #[error("Field '{field}' rejected non-finite value {value}")]
    NotFinite {
        /// Field that rejected the edit
        field: PanelField,
        /// Offending value
        value: f32,
    },
}

/// A value carried by a panel field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelValue {
    /// Slider value
    Number(f32),
    /// Color as `0xRRGGBB`
    Color(u32),
}

/// What a field accepts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Number clamped into `[min, max]`
    Range {
        /// Lowest accepted value
        min: f32,
        /// Highest accepted value
        max: f32,
    },
    /// `0xRRGGBB` color
    Color,
}

/// Fields shown on the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelField {
    /// Sun intensity
    SunIntensity,
    /// Sun position X
    SunX,
    /// Sun position Y
    SunY,
    /// Sun position Z
    SunZ,
    /// Sun color
    SunColor,
    /// Ambient color
    AmbientColor,
    /// Ambient intensity
    AmbientIntensity,
    /// Background color
    BackgroundColor,
}

impl PanelField {
    /// Every field in display order
    pub const ALL: [Self; 8] = [
        Self::SunIntensity,
        Self::SunX,
        Self::SunY,
        Self::SunZ,
        Self::SunColor,
        Self::AmbientColor,
        Self::AmbientIntensity,
        Self::BackgroundColor,
    ];

    /// Label shown next to the control
    pub const fn label(self) -> &'static str {
        match self {
            Self::SunIntensity => "Dir intensity",
            Self::SunX => "Dir X pos",
            Self::SunY => "Dir Y pos",
            Self::SunZ => "Dir Z pos",
            Self::SunColor => "Dir color",
            Self::AmbientColor => "Amb color",
            Self::AmbientIntensity => "Amb intensity",
            Self::BackgroundColor => "BG color",
        }
    }

    /// Accepted kind and range
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::SunIntensity | Self::AmbientIntensity => FieldKind::Range { min: 0.0, max: 10.0 },
            Self::SunX | Self::SunZ => FieldKind::Range {
                min: -100.0,
                max: 100.0,
            },
            Self::SunY => FieldKind::Range { min: 0.0, max: 100.0 },
            Self::SunColor | Self::AmbientColor | Self::BackgroundColor => FieldKind::Color,
        }
    }

    /// Look a field up by its label
    pub fn from_label(label: &str) -> Result<Self, PanelError> {
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| PanelError::UnknownField(label.to_string()))
    }

    const fn sun_axis(self) -> Option<Axis> {
        match self {
            Self::SunX => Some(Axis::X),
            Self::SunY => Some(Axis::Y),
            Self::SunZ => Some(Axis::Z),
            _ => None,
        }
    }
}

impl fmt::Display for PanelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

type ChangeCallback = Box<dyn FnMut(PanelField, PanelValue)>;

/// Panel binding fields to a [`SceneLighting`]
#[derive(Default)]
pub struct ParameterPanel {
    callbacks: HashMap<PanelField, Vec<ChangeCallback>>,
}

impl ParameterPanel {
    /// Panel with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback fired after each accepted edit of `field`
    pub fn on_change<F>(&mut self, field: PanelField, callback: F)
    where
        F: FnMut(PanelField, PanelValue) + 'static,
    {
        self.callbacks.entry(field).or_default().push(Box::new(callback));
    }

    /// Current value of `field` in `lighting`
    pub fn value(lighting: &SceneLighting, field: PanelField) -> PanelValue {
        match field {
            PanelField::SunIntensity => PanelValue::Number(lighting.sun.intensity),
            PanelField::SunX | PanelField::SunY | PanelField::SunZ => {
                let axis = field.sun_axis().unwrap_or(Axis::X);
                PanelValue::Number(lighting.sun.coordinate(axis))
            }
            PanelField::SunColor => PanelValue::Color(lighting.sun.color.to_hex()),
            PanelField::AmbientColor => PanelValue::Color(lighting.ambient.color.to_hex()),
            PanelField::AmbientIntensity => PanelValue::Number(lighting.ambient.intensity),
            PanelField::BackgroundColor => PanelValue::Color(lighting.background.to_hex()),
        }
    }

    /// Apply an edit and return the value actually stored
    pub fn set(
        &mut self,
        lighting: &mut SceneLighting,
        field: PanelField,
        value: PanelValue,
    ) -> Result<PanelValue, PanelError> {
        let accepted = match (field.kind(), value) {
            (FieldKind::Range { min, max }, PanelValue::Number(number)) => {
                if !number.is_finite() {
                    return Err(PanelError::NotFinite { field, value: number });
                }
                PanelValue::Number(number.clamp(min, max))
            }
            (FieldKind::Color, PanelValue::Color(hex)) => PanelValue::Color(hex & 0x00ff_ffff),
            (FieldKind::Range { .. }, PanelValue::Color(_)) => {
                return Err(PanelError::KindMismatch {
                    field,
                    expected: "numeric",
                })
            }
            (FieldKind::Color, PanelValue::Number(_)) => {
                return Err(PanelError::KindMismatch {
                    field,
                    expected: "color",
                })
            }
        };

        Self::write(lighting, field, accepted);
        log::debug!("Panel '{}' set to {:?}", field, accepted);

        if let Some(callbacks) = self.callbacks.get_mut(&field) {
            for callback in callbacks.iter_mut() {
                callback(field, accepted);
            }
        }
        Ok(accepted)
    }

    /// Apply an edit addressed by label
    pub fn set_by_label(
        &mut self,
        lighting: &mut SceneLighting,
        label: &str,
        value: PanelValue,
    ) -> Result<PanelValue, PanelError> {
        let field = PanelField::from_label(label)?;
        self.set(lighting, field, value)
    }

    fn write(lighting: &mut SceneLighting, field: PanelField, value: PanelValue) {
        match (field, value) {
            (PanelField::SunIntensity, PanelValue::Number(v)) => lighting.sun.intensity = v,
            (PanelField::AmbientIntensity, PanelValue::Number(v)) => lighting.ambient.intensity = v,
            (PanelField::SunColor, PanelValue::Color(hex)) => lighting.sun.color = Color::from_hex(hex),
            (PanelField::AmbientColor, PanelValue::Color(hex)) => {
                lighting.ambient.color = Color::from_hex(hex);
            }
            (PanelField::BackgroundColor, PanelValue::Color(hex)) => {
                lighting.background = Color::from_hex(hex);
            }
            (axis_field, PanelValue::Number(v)) => {
                if let Some(axis) = axis_field.sun_axis() {
                    lighting.sun.set_coordinate(axis, v);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Debug for ParameterPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: usize = self.callbacks.values().map(Vec::len).sum();
        f.debug_struct("ParameterPanel")
            .field("callbacks", &registered)
            .finish()
    }
}
