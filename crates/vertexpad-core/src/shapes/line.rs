//! Line shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{Color, Point};
use uuid::Uuid;

/// A straight segment between two endpoints, drawn as a line strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ShapeId,
    points: [Point; 2],
    color: Color,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: [start, end],
            color,
        }
    }

    /// Index of the other endpoint.
    pub fn opposite(index: usize) -> usize {
        (index + 1) % 2
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
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
