//! Shape definitions for the editor.

mod line;
mod polygon;
mod rectangle;
mod square;

pub use line::Line;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use square::Square;

use crate::geometry::{Color, Point};
use crate::render::{Primitive, Surface};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Shape errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Empty shape: {kind}")]
    Empty { kind: ShapeKind },
    #[error("{kind} needs at least {expected} points, got {found}")]
    TooFewPoints {
        kind: ShapeKind,
        expected: usize,
        found: usize,
    },
    #[error("{kind} needs exactly {expected} points, got {found}")]
    WrongPointCount {
        kind: ShapeKind,
        expected: usize,
        found: usize,
    },
}

impl ShapeError {
    /// Check a point count: polygons take two or more, every other
    /// variant exactly `exact`.
    pub(crate) fn check_count(kind: ShapeKind, found: usize, exact: usize) -> Result<(), Self> {
        match kind {
            ShapeKind::Polygon if found < 2 => Err(ShapeError::TooFewPoints {
                kind,
                expected: 2,
                found,
            }),
            ShapeKind::Polygon => Ok(()),
            _ if found < exact => Err(ShapeError::TooFewPoints {
                kind,
                expected: exact,
                found,
            }),
            _ if found > exact => Err(ShapeError::WrongPointCount {
                kind,
                expected: exact,
                found,
            }),
            _ => Ok(()),
        }
    }
}

/// The closed set of shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Polygon,
    Rectangle,
    Square,
}

impl ShapeKind {
    /// Variant name used in saved scenes.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
        }
    }

    /// Look up a variant by its saved name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Line" => Some(ShapeKind::Line),
            "Polygon" => Some(ShapeKind::Polygon),
            "Rectangle" => Some(ShapeKind::Rectangle),
            "Square" => Some(ShapeKind::Square),
            _ => None,
        }
    }

    /// Primitive type the render driver draws this variant with.
    pub fn primitive(self) -> Primitive {
        match self {
            ShapeKind::Line => Primitive::LineStrip,
            ShapeKind::Polygon | ShapeKind::Rectangle | ShapeKind::Square => Primitive::TriangleFan,
        }
    }

    /// Whether the variant is a derived four-corner quad.
    pub fn is_quad(self) -> bool {
        matches!(self, ShapeKind::Rectangle | ShapeKind::Square)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Axis-aligned bounds of a point set (Y up, so `top >= bottom`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Boundaries {
    /// Min/max over the points, `None` if there are none.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            left: first.x,
            right: first.x,
            top: first.y,
            bottom: first.y,
        };
        Some(points.iter().fold(init, |b, p| Self {
            left: b.left.min(p.x),
            right: b.right.max(p.x),
            top: b.top.max(p.y),
            bottom: b.bottom.min(p.y),
        }))
    }

    /// Grow the box by `radius` on every side.
    pub fn expanded(self, radius: f64) -> Self {
        Self {
            left: self.left - radius,
            right: self.right + radius,
            top: self.top + radius,
            bottom: self.bottom - radius,
        }
    }

    /// Inclusive containment.
    pub fn contains(&self, point: Point) -> bool {
        self.left <= point.x
            && point.x <= self.right
            && self.bottom <= point.y
            && point.y <= self.top
    }

    /// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }
}

/// Common trait for all shape variants.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Which variant this is.
    fn kind(&self) -> ShapeKind;

    /// Points in drawing order.
    fn points(&self) -> &[Point];

    /// Mutable access to the points (the count is fixed).
    fn points_mut(&mut self) -> &mut [Point];

    /// The shape's own color.
    fn color(&self) -> &Color;

    fn color_mut(&mut self) -> &mut Color;

    /// Bounding box of the points.
    fn boundaries(&self) -> Result<Boundaries, ShapeError> {
        Boundaries::from_points(self.points()).ok_or(ShapeError::Empty { kind: self.kind() })
    }

    /// Whether `point` lies in the bounding box grown by `radius`.
    ///
    /// This is a box test, not exact polygon containment.
    fn contains(&self, point: Point, radius: f64) -> bool {
        self.boundaries()
            .map(|b| b.expanded(radius).contains(point))
            .unwrap_or(false)
    }

    /// Interleaved `[x, y, r, g, b]` vertex data.
    fn vertex_data(&self) -> Vec<f32> {
        let [r, g, b] = self.color().to_normalized();
        self.points()
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, r, g, b])
            .collect()
    }
}

/// Index of the corner diagonally across a four-point quad.
pub(crate) fn quad_opposite(index: usize) -> usize {
    (index + 2) % 4
}

/// Enum wrapper for all shape variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Polygon(Polygon),
    Rectangle(Rectangle),
    Square(Square),
}

impl Shape {
    /// Build a shape of `kind` from its variant constructor inputs.
    ///
    /// Lines take their two endpoints, polygons their full point list,
    /// rectangles and squares two opposite corners (anchor first).
    /// `aspect` is the viewport height / width ratio used by squares.
    pub fn build(
        kind: ShapeKind,
        points: &[Point],
        color: Color,
        aspect: f64,
    ) -> Result<Self, ShapeError> {
        ShapeError::check_count(kind, points.len(), 2)?;
        Ok(match kind {
            ShapeKind::Line => Shape::Line(Line::new(points[0], points[1], color)),
            ShapeKind::Polygon => Shape::Polygon(Polygon::from_points(points.to_vec(), color)),
            ShapeKind::Rectangle => {
                Shape::Rectangle(Rectangle::from_corners(points[0], points[1], color))
            }
            ShapeKind::Square => {
                Shape::Square(Square::from_corners(points[0], points[1], color, aspect))
            }
        })
    }

    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Polygon(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Line(s) => s,
            Shape::Polygon(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
        }
    }

    /// Replace the identifier, used when a rebuilt shape takes the place of another.
    pub fn set_id(&mut self, id: ShapeId) {
        match self {
            Shape::Line(s) => s.id = id,
            Shape::Polygon(s) => s.id = id,
            Shape::Rectangle(s) => s.id = id,
            Shape::Square(s) => s.id = id,
        }
    }

    /// Upload this shape's vertices and issue its draw call.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let points = self.points();
        if points.is_empty() {
            return;
        }
        surface.draw_primitive(self.kind().primitive(), &self.vertex_data(), points.len());
    }
}

impl ShapeTrait for Shape {
    fn id(&self) -> ShapeId {
        self.inner().id()
    }

    fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Square(_) => ShapeKind::Square,
        }
    }

    fn points(&self) -> &[Point] {
        self.inner().points()
    }

    fn points_mut(&mut self) -> &mut [Point] {
        self.inner_mut().points_mut()
    }

    fn color(&self) -> &Color {
        self.inner().color()
    }

    fn color_mut(&mut self) -> &mut Color {
        self.inner_mut().color_mut()
    }
}
