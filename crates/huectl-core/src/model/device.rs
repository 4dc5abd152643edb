// ── Device domain types ──

use serde::Serialize;

use huectl_api::clip::models::{self as wire, Light};

/// CIE 1931 chromaticity coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorXy {
    pub x: f64,
    pub y: f64,
}

/// Color gamut triangle reported by a color-capable light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Gamut {
    pub red: ColorXy,
    pub green: ColorXy,
    pub blue: ColorXy,
}

/// A light as reported by the bridge. Fetched fresh on every listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: String,
    pub id_v1: Option<String>,
    pub name: String,
    pub archetype: Option<String>,
    pub on: bool,
    /// Percentage, 0-100. `None` for lights without dimming.
    pub brightness: Option<f64>,
    pub color_xy: Option<ColorXy>,
    pub color_temperature_mirek: Option<u16>,
    pub gamut: Option<Gamut>,
    pub gamut_type: Option<String>,
}

impl Device {
    /// One-line power state, e.g. `On (Brightness: 63.50, XY: (0.4573, 0.4100))`.
    pub fn state_summary(&self) -> String {
        if !self.on {
            return "Off".into();
        }
        match (self.brightness, self.color_xy) {
            (Some(b), Some(xy)) => {
                format!("On (Brightness: {b:.2}, XY: ({:.4}, {:.4}))", xy.x, xy.y)
            }
            (Some(b), None) => format!("On (Brightness: {b:.2})"),
            (None, _) => "On".into(),
        }
    }
}

impl From<wire::Xy> for ColorXy {
    fn from(xy: wire::Xy) -> Self {
        Self { x: xy.x, y: xy.y }
    }
}

impl From<wire::Gamut> for Gamut {
    fn from(g: wire::Gamut) -> Self {
        Self {
            red: g.red.into(),
            green: g.green.into(),
            blue: g.blue.into(),
        }
    }
}

impl From<Light> for Device {
    fn from(light: Light) -> Self {
        let (color_xy, gamut, gamut_type) = match light.color {
            Some(color) => (
                Some(color.xy.into()),
                color.gamut.map(Gamut::from),
                color.gamut_type,
            ),
            None => (None, None, None),
        };

        Self {
            id: light.id,
            id_v1: light.id_v1,
            name: light.metadata.name,
            archetype: light.metadata.archetype,
            on: light.on.on,
            brightness: light.dimming.map(|d| d.brightness),
            color_xy,
            color_temperature_mirek: light.color_temperature.and_then(|ct| ct.mirek),
            gamut,
            gamut_type,
        }
    }
}
