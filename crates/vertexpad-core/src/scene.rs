//! The scene: ordered shapes plus the current drawing colors.

use crate::geometry::{Color, Point};
use crate::shapes::{Shape, ShapeId, ShapeTrait};

/// Everything the editor draws, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Shapes in insertion (z) order.
    shapes: Vec<Shape>,
    /// Color new shapes are created with.
    pub shape_color: Color,
    /// Background color.
    pub canvas_color: Color,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK, Color::WHITE)
    }
}

impl Scene {
    pub fn new(shape_color: Color, canvas_color: Color) -> Self {
        Self {
            shapes: Vec::new(),
            shape_color,
            canvas_color,
        }
    }

    /// Append a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Swap the shape with `id` for `shape`, keeping its position and id.
    ///
    /// Returns the previous shape, or `None` (and drops nothing) if `id` is unknown.
    pub fn replace_shape(&mut self, id: ShapeId, mut shape: Shape) -> Option<Shape> {
        let index = self.index_of(id)?;
        shape.set_id(id);
        Some(std::mem::replace(&mut self.shapes[index], shape))
    }

    /// Remove every shape. Colors are kept.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Z position of a shape.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// The top-most shape under `point`.
    pub fn shape_at_point(&self, point: Point, radius: f64) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains(point, radius))
            .map(|s| s.id())
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Rectangle};

    fn rect(x: f64, y: f64, size: f64) -> Shape {
        Shape::Rectangle(Rectangle::from_corners(
            Point::new(x, y),
            Point::new(x + size, y + size),
            Color::BLACK,
        ))
    }

    #[test]
    fn test_scene_creation() {
        let scene = Scene::default();
        assert!(scene.is_empty());
        assert_eq!(scene.shape_color, Color::BLACK);
        assert_eq!(scene.canvas_color, Color::WHITE);
    }

    #[test]
    fn test_add_shape() {
        let mut scene = Scene::default();
        let id = scene.add_shape(rect(0.0, 0.0, 0.2));
        assert_eq!(scene.len(), 1);
        assert!(scene.get_shape(id).is_some());
        assert_eq!(scene.index_of(id), Some(0));
    }

    #[test]
    fn test_shape_at_point_prefers_topmost() {
        let mut scene = Scene::default();
        let bottom = scene.add_shape(rect(0.0, 0.0, 0.5));
        let top = scene.add_shape(rect(0.2, 0.2, 0.5));

        assert_eq!(scene.shape_at_point(Point::new(0.3, 0.3), 0.0), Some(top));
        assert_eq!(scene.shape_at_point(Point::new(0.1, 0.1), 0.0), Some(bottom));
        assert_eq!(scene.shape_at_point(Point::new(-0.9, -0.9), 0.05), None);
    }

    #[test]
    fn test_hit_test_with_tolerance() {
        let mut scene = Scene::default();
        let id = scene.add_shape(rect(0.0, 0.0, 0.2));
        assert_eq!(scene.shape_at_point(Point::new(0.23, 0.1), 0.0), None);
        assert_eq!(scene.shape_at_point(Point::new(0.23, 0.1), 0.05), Some(id));
    }

    #[test]
    fn test_replace_keeps_position_and_id() {
        let mut scene = Scene::default();
        let first = scene.add_shape(rect(0.0, 0.0, 0.2));
        let second = scene.add_shape(rect(0.5, 0.5, 0.2));
        let replacement = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0), Color::WHITE));

        let old = scene.replace_shape(first, replacement).unwrap();
        assert_eq!(old.id(), first);
        assert_eq!(scene.index_of(first), Some(0));
        assert_eq!(scene.index_of(second), Some(1));
        assert_eq!(scene.get_shape(first).unwrap().points()[1], Point::new(1.0, 1.0));

        let unknown = rect(0.0, 0.0, 0.1);
        assert!(scene.replace_shape(uuid::Uuid::new_v4(), unknown).is_none());
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_clear_keeps_colors() {
        let mut scene = Scene::new(Color::new(1, 2, 3), Color::new(4, 5, 6));
        scene.add_shape(rect(0.0, 0.0, 0.2));
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.shape_color, Color::new(1, 2, 3));
        assert_eq!(scene.canvas_color, Color::new(4, 5, 6));
    }
}
