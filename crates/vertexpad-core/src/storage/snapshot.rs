//! Saved scene format.
//!
//! ```json
//! {
//!   "shapes": [{
//!     "variantName": "Line",
//!     "points": [{"x": 0, "y": 0}, ...],
//!     "color": {"red": 0, "green": 0, "blue": 0}
//!   }],
//!   "shapeColor": { "red": 0, "green": 0, "blue": 0 },
//!   "canvasColor": { "red": 255, "green": 255, "blue": 255 }
//! }
//! ```
//!
//! Older saves wrap this object as `{"current": {...}}` and name the
//! variant field `name`; both forms load.

use crate::geometry::{Color, Point};
use crate::scene::Scene;
use crate::shapes::{Shape, ShapeError, ShapeKind, ShapeTrait, Square};
use serde::{Deserialize, Serialize};

/// One saved shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(alias = "name")]
    pub variant_name: String,
    pub points: Vec<Point>,
    pub color: Color,
}

impl ShapeRecord {
    pub fn capture(shape: &Shape) -> Self {
        Self {
            variant_name: shape.kind().name().to_string(),
            points: shape.points().to_vec(),
            color: *shape.color(),
        }
    }

    /// Rebuild the shape through its variant constructor.
    ///
    /// Quads are derived again from stored corners 0 and 2. Lines must
    /// carry exactly two points, quads four and polygons at least two.
    /// Returns `Ok(None)` for variant names this build does not know.
    pub fn to_shape(&self, aspect: f64) -> Result<Option<Shape>, ShapeError> {
        let Some(kind) = ShapeKind::from_name(&self.variant_name) else {
            return Ok(None);
        };
        let stored = match kind {
            ShapeKind::Line => 2,
            _ => 4,
        };
        ShapeError::check_count(kind, self.points.len(), stored)?;
        let (points, color) = (&self.points, self.color);
        let shape = match kind {
            ShapeKind::Line | ShapeKind::Polygon => Shape::build(kind, points, color, aspect)?,
            ShapeKind::Rectangle => Shape::build(kind, &[points[0], points[2]], color, aspect)?,
            ShapeKind::Square => {
                Shape::Square(Square::restore(points[0], points[2], color, aspect))
            }
        };
        Ok(Some(shape))
    }
}

/// A serialisable copy of a [`Scene`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub shapes: Vec<ShapeRecord>,
    pub shape_color: Color,
    pub canvas_color: Color,
}

impl SceneSnapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            shapes: scene.shapes().iter().map(ShapeRecord::capture).collect(),
            shape_color: scene.shape_color,
            canvas_color: scene.canvas_color,
        }
    }

    /// Build a scene. Unknown or malformed records are skipped.
    pub fn to_scene(&self, aspect: f64) -> Scene {
        let mut scene = Scene::new(self.shape_color, self.canvas_color);
        for (index, record) in self.shapes.iter().enumerate() {
            match record.to_shape(aspect) {
                Ok(Some(shape)) => {
                    scene.add_shape(shape);
                }
                Ok(None) => {
                    log::warn!("Skipping shape {index}: unknown variant {:?}", record.variant_name)
                }
                Err(e) => log::warn!("Skipping shape {index}: {e}"),
            }
        }
        scene
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot, unwrapping the legacy `current` envelope if present.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(current) = value.get_mut("current").map(serde_json::Value::take) {
            value = current;
        }
        serde_json::from_value(value)
    }
}
