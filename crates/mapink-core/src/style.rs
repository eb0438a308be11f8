//! Stroke styling and the active-style resolver.

use crate::shapes::{ShapeDraft, ShapeKind};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error parsing a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must be 3 or 6 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color: {0:?}")]
    BadDigit(String),
}

/// An RGB stroke color, `#rrggbb` in serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        let digit = |range: &str| -> Result<u8, ColorParseError> {
            u8::from_str_radix(range, 16).map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        match hex.len() {
            3 => Ok(Self::new(
                digit(&hex[0..1])? * 17,
                digit(&hex[1..2])? * 17,
                digit(&hex[2..3])? * 17,
            )),
            6 => Ok(Self::new(
                digit(&hex[0..2])?,
                digit(&hex[2..4])?,
                digit(&hex[4..6])?,
            )),
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }

    /// Lowercase `#rrggbb` form; the canonical serialized encoding.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::from_hex(&text).map_err(D::Error::custom)
    }
}

/// Stroke styling attached to a shape at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub color: Color,
    /// Stroke thickness in the host's pixel units.
    pub thickness: f64,
    pub dashed: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::new(0x33, 0x88, 0xff),
            thickness: 2.0,
            dashed: false,
        }
    }
}

/// Holds the active style applied to newly drawn shapes.
///
/// Updates restyle the in-progress draft live; committed shapes are never
/// retroactively restyled.
#[derive(Debug, Clone, Default)]
pub struct StyleState {
    active: Style,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The style applied to the next shape.
    pub fn active(&self) -> &Style {
        &self.active
    }

    /// Style for a new buffer of `kind`; the dash flag comes from the kind.
    pub fn style_for(&self, kind: ShapeKind) -> Style {
        Style {
            dashed: kind.is_dashed(),
            ..self.active
        }
    }

    /// Update the active color, restyling the draft when one is open.
    pub fn set_color(&mut self, color: Color, draft: Option<&mut ShapeDraft>) {
        self.active.color = color;
        if let Some(draft) = draft {
            draft.style.color = color;
        }
    }

    /// Update the active thickness, restyling the draft when one is open.
    /// Nonpositive or non-finite values are absorbed.
    pub fn set_thickness(&mut self, px: f64, draft: Option<&mut ShapeDraft>) {
        if !px.is_finite() || px <= 0.0 {
            log::warn!("ignoring invalid stroke thickness {px}");
            return;
        }
        self.active.thickness = px;
        if let Some(draft) = draft {
            draft.style.thickness = px;
        }
    }
}
