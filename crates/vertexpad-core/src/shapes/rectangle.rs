//! Rectangle shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{Color, Point};
use uuid::Uuid;

/// An axis-aligned rectangle derived from two opposite corners.
///
/// The four derived corners are stored in fan order starting at the anchor:
/// `[a, (a.x, b.y), b, (b.x, a.y)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    points: [Point; 4],
    color: Color,
}

impl Rectangle {
    /// Create a rectangle from an anchor corner and the opposite corner.
    pub fn from_corners(anchor: Point, opposite: Point, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: [
                anchor,
                Point::new(anchor.x, opposite.y),
                opposite,
                Point::new(opposite.x, anchor.y),
            ],
            color,
        }
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    fn color(&self) -> &Color {
        &self.color
    }

    fn color_mut(&mut self) -> &mut Color {
        &mut self.color
    }
}
