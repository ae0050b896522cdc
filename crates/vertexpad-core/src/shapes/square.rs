//! Square shape.

use super::{ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::{Color, Point};
use uuid::Uuid;

/// A square anchored at one corner, sized by the shorter drag delta.
///
/// Device space is stretched on non-square viewports, so the horizontal
/// side is scaled by `aspect` (viewport height / width) to stay square on
/// screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    pub(crate) id: ShapeId,
    points: [Point; 4],
    color: Color,
}

impl Square {
    /// Derive a square from the anchor and a free point.
    ///
    /// The square grows from the anchor towards the free point's quadrant.
    pub fn from_corners(anchor: Point, free: Point, color: Color, aspect: f64) -> Self {
        let side = (anchor.x - free.x).abs().min((anchor.y - free.y).abs());
        let sx = if free.x < anchor.x { -1.0 } else { 1.0 };
        let sy = if free.y > anchor.y { 1.0 } else { -1.0 };
        let dx = sx * side * aspect;
        let dy = sy * side;
        Self {
            id: Uuid::new_v4(),
            points: [
                anchor,
                Point::new(anchor.x, anchor.y + dy),
                Point::new(anchor.x + dx, anchor.y + dy),
                Point::new(anchor.x + dx, anchor.y),
            ],
            color,
        }
    }

    /// Rebuild a square from two stored diagonal corners.
    ///
    /// The horizontal aspect scaling is undone first so that a saved square
    /// comes back with the same corners.
    pub fn restore(anchor: Point, diagonal: Point, color: Color, aspect: f64) -> Self {
        let dx = if aspect.abs() > f64::EPSILON {
            (diagonal.x - anchor.x) / aspect
        } else {
            diagonal.x - anchor.x
        };
        Self::from_corners(anchor, Point::new(anchor.x + dx, diagonal.y), color, aspect)
    }
}

impl ShapeTrait for Square {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Square
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
