//! Editor configuration.

use crate::geometry::Color;
use crate::input::Viewport;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Colors used for tool decorations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayColors {
    /// Selection bounding box.
    #[serde(with = "hex")]
    pub selection: Color,
    /// Edge borders drawn by the point tools.
    #[serde(with = "hex")]
    pub edges: Color,
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            selection: Color::new(0, 0, 125),
            edges: Color::new(125, 0, 125),
        }
    }
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Hit-test slack around shapes, in pixels.
    pub hit_tolerance: f64,
    /// Per-axis distance, in device units, within which a resize grabs a corner.
    pub resize_threshold: f64,
    #[serde(with = "hex")]
    pub shape_color: Color,
    #[serde(with = "hex")]
    pub canvas_color: Color,
    pub overlay: OverlayColors,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            hit_tolerance: 20.0,
            resize_threshold: 0.1,
            shape_color: Color::BLACK,
            canvas_color: Color::WHITE,
            overlay: OverlayColors::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.hit_tolerance >= 0.0) || !(self.resize_threshold >= 0.0) {
            return Err(ConfigError::Invalid("tolerances must be non-negative".to_string()));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.width), f64::from(self.height))
    }
}

/// `#rrggbb` (de)serialisation for [`Color`] fields.
mod hex {
    use crate::geometry::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
