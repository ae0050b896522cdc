//! Geometry primitives: points, vectors and RGB colors.
//!
//! Points live in normalized device space (`[-1, 1]` on both axes, Y up).
//! They are plain kurbo values, so copying and translating are ordinary
//! assignment and `+=`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use kurbo::{Point, Vec2};

/// A displacement between two points.
pub type Vector = Vec2;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color {0:?}, expected #RRGGBB")]
    InvalidHex(String),
}

/// RGB color with channels in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse a `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        if hex.len() != 7 || !hex.is_ascii() || !hex.starts_with('#') {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self {
            red: channel(1..3)?,
            green: channel(3..5)?,
            blue: channel(5..7)?,
        })
    }

    /// Overwrite this color from a `#RRGGBB` string.
    /// The color is left untouched when parsing fails.
    pub fn set_from_hex(&mut self, hex: &str) -> Result<(), ColorError> {
        *self = Self::from_hex(hex)?;
        Ok(())
    }

    /// Copy the channels of another color into this one.
    pub fn copy_from(&mut self, other: &Color) {
        self.red = other.red;
        self.green = other.green;
        self.blue = other.blue;
    }

    /// Channels scaled to `[0, 1]` for the render driver.
    pub fn to_normalized(self) -> [f32; 3] {
        [
            f32::from(self.red) / 255.0,
            f32::from(self.green) / 255.0,
            f32::from(self.blue) / 255.0,
        ]
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

/// Exact proximity test: both axis deltas within `threshold`.
pub fn is_near(a: Point, b: Point, threshold: f64) -> bool {
    (a.x - b.x).abs() <= threshold && (a.y - b.y).abs() <= threshold
}

/// Vector from `from` to `to`.
pub fn direction(from: Point, to: Point) -> Vector {
    to - from
}

/// Project `v` onto the line spanned by `onto`.
///
/// Returns `None` when `onto` has no length.
pub fn project(v: Vector, onto: Vector) -> Option<Vector> {
    let len_sq = onto.hypot2();
    if len_sq < f64::EPSILON * f64::EPSILON {
        return None;
    }
    Some(onto * (v.dot(onto) / len_sq))
}
