// CLIP v2 response types
//
// Models for the bridge's v2 resource API. Every response is wrapped in the
// `ClipResponse<T>` envelope. Capability blocks (`dimming`, `color`, ...) are
// optional because a plain on/off plug reports none of them.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard CLIP v2 response envelope.
///
/// ```json
/// { "errors": [{ "description": "..." }], "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct ClipResponse<T> {
    #[serde(default)]
    pub errors: Vec<ClipError>,
    pub data: Vec<T>,
}

/// A single entry of the envelope's `errors` array.
///
/// Entries are informational, so anything that is not the usual
/// `{ "description": ... }` object is kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClipError {
    Described { description: String },
    Other(serde_json::Value),
}

impl ClipError {
    pub fn description(&self) -> String {
        match self {
            Self::Described { description } => description.clone(),
            Self::Other(value) => value.to_string(),
        }
    }
}

/// Reference to another resource, as returned in `owner` and PUT results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub rid: String,
    pub rtype: String,
}

// ── Light ────────────────────────────────────────────────────────────

/// A `light` resource from `GET /clip/v2/resource/light`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub id: String,
    #[serde(default)]
    pub id_v1: Option<String>,
    #[serde(default)]
    pub owner: Option<ResourceLink>,
    pub metadata: LightMetadata,
    pub on: On,
    #[serde(default)]
    pub dimming: Option<Dimming>,
    #[serde(default)]
    pub color_temperature: Option<ColorTemperature>,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightMetadata {
    pub name: String,
    #[serde(default)]
    pub archetype: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct On {
    pub on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimming {
    /// Percentage, 0-100.
    pub brightness: f64,
    #[serde(default)]
    pub min_dim_level: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTemperature {
    /// `null` while the light is in color mode.
    #[serde(default)]
    pub mirek: Option<u16>,
    #[serde(default)]
    pub mirek_valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub xy: Xy,
    #[serde(default)]
    pub gamut: Option<Gamut>,
    #[serde(default)]
    pub gamut_type: Option<String>,
}

/// CIE 1931 chromaticity coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

/// Triangle of reproducible colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gamut {
    pub red: Xy,
    pub green: Xy,
    pub blue: Xy,
}

// ── Requests ─────────────────────────────────────────────────────────

/// Body for `PUT /clip/v2/resource/light/{id}`.
///
/// Only set fields are serialized, so a power toggle is exactly
/// `{"on":{"on":true}}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LightUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<On>,
}

impl LightUpdate {
    pub fn power(on: bool) -> Self {
        Self { on: Some(On { on }) }
    }
}
