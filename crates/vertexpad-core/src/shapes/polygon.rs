//! Polygon shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{Color, Point};
use uuid::Uuid;

/// A closed outline filled as a triangle fan around its first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    points: Vec<Point>,
    color: Color,
}

impl Polygon {
    /// Create a polygon from its vertices, kept verbatim.
    pub fn from_points(points: Vec<Point>, color: Color) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
        }
    }

    /// Append a vertex.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Polygon {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_kept_verbatim() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        let polygon = Polygon::from_points(pts.clone(), Color::WHITE);
        assert_eq!(polygon.points(), pts.as_slice());
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn test_push() {
        let mut polygon = Polygon::from_points(vec![Point::ZERO], Color::WHITE);
        polygon.push(Point::new(0.5, 0.5));
        assert_eq!(polygon.len(), 2);
        assert_eq!(polygon.points()[1], Point::new(0.5, 0.5));
    }
}
