//! Transform tool: drag individual vertices of a shape.
//!
//! Squares always move their vertex along the diagonal through the
//! opposite corner; lines and rectangles do so while shift is held. The
//! drag vector is scaled per axis so that motion stays proportional on a
//! non-square viewport. For rectangles and squares the two neighbouring
//! corners follow the dragged one so the quad stays axis aligned.

use super::{ToolContext, ToolHandler};
use crate::config::OverlayColors;
use crate::geometry::{direction, project, Point, Vector};
use crate::input::{EventResponse, PointerEvent};
use crate::render::{Overlay, RenderContext};
use crate::shapes::{quad_opposite, Line, ShapeId, ShapeKind, ShapeTrait};

#[derive(Debug, Clone, PartialEq)]
struct VertexDrag {
    /// Pointer position at press.
    origin: Point,
    /// Index of the dragged point.
    index: usize,
    /// Shape points at press.
    snapshot: Vec<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct TransformTool {
    active: Option<ShapeId>,
    drag: Option<VertexDrag>,
}

/// Sign with zero mapped to zero.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Index of the point a constrained drag pivots around.
fn pivot_index(kind: ShapeKind, index: usize) -> usize {
    match kind {
        ShapeKind::Line => Line::opposite(index),
        _ => quad_opposite(index),
    }
}

/// New positions for a drag of `index` by the raw pointer offset `raw`.
///
/// `scale` is the viewport drag scale.
fn dragged_points(
    kind: ShapeKind,
    snapshot: &[Point],
    index: usize,
    raw: Vector,
    constrain: bool,
    scale: Vector,
) -> Vec<Point> {
    let mut v = raw;
    let mut points = snapshot.to_vec();
    let pivoted = kind == ShapeKind::Square
        || (constrain && matches!(kind, ShapeKind::Line | ShapeKind::Rectangle));

    if pivoted {
        let pivot = pivot_index(kind, index);
        let axis = snapshot.get(pivot).map(|p| direction(*p, snapshot[index]));
        if let Some(projected) = axis.and_then(|axis| project(v, axis)) {
            v = projected;
        }
        if kind == ShapeKind::Square {
            v.x = sign(v.x) * v.x.abs().min(v.y.abs());
            v.y = sign(v.y) * v.x.abs();
        }
    }

    v.x *= scale.x;
    v.y *= scale.y;
    let moved = snapshot[index] + v;
    points[index] = moved;

    if kind.is_quad() && snapshot.len() == 4 {
        for adjacent in [(index + 1) % 4, (index + 3) % 4] {
            let dx = (snapshot[adjacent].x - snapshot[index].x).abs();
            let dy = (snapshot[adjacent].y - snapshot[index].y).abs();
            if dx > dy {
                points[adjacent].y = moved.y;
            } else {
                points[adjacent].x = moved.x;
            }
        }
    }
    points
}

impl TransformTool {
    pub fn active(&self) -> Option<ShapeId> {
        self.active
    }

    /// Index of the point being dragged.
    pub fn active_point(&self) -> Option<usize> {
        self.drag.as_ref().map(|d| d.index)
    }
}

impl ToolHandler for TransformTool {
    fn reset(&mut self) {
        self.active = None;
        self.drag = None;
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        self.active = ctx.scene.shape_at_point(event.position, ctx.hit_radius);
        EventResponse::REPAINT
    }

    fn on_pointer_down(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: &PointerEvent,
    ) -> EventResponse {
        if self.drag.is_some() {
            return EventResponse::IGNORED;
        }
        let Some(shape) = self.active.and_then(|id| ctx.scene.get_shape(id)) else {
            return EventResponse::IGNORED;
        };
        let points = shape.points();
        let hit = points
            .iter()
            .rposition(|p| (*p - event.position).hypot() < ctx.hit_radius);
        if let Some(index) = hit {
            log::debug!("Grabbed vertex {index} of {}", shape.kind());
            self.drag = Some(VertexDrag {
                origin: event.position,
                index,
                snapshot: points.to_vec(),
            });
        }
        EventResponse::IGNORED
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: &PointerEvent,
    ) -> EventResponse {
        let (Some(drag), Some(active)) = (self.drag.as_ref(), self.active) else {
            return EventResponse::IGNORED;
        };
        let scale = ctx.viewport.drag_scale();
        let Some(shape) = ctx.scene.get_shape_mut(active) else {
            self.reset();
            return EventResponse::IGNORED;
        };
        let updated = dragged_points(
            shape.kind(),
            &drag.snapshot,
            drag.index,
            event.position - drag.origin,
            event.modifiers.shift,
            scale,
        );
        for (point, new) in shape.points_mut().iter_mut().zip(updated) {
            *point = new;
        }
        EventResponse::REPAINT
    }

    fn on_pointer_up(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> EventResponse {
        self.drag = None;
        EventResponse::IGNORED
    }

    fn decorate<'a>(&'a self, ctx: RenderContext<'a>, colors: &OverlayColors) -> RenderContext<'a> {
        let points = self
            .active
            .and_then(|id| ctx.scene.get_shape(id))
            .map(|shape| shape.points().to_vec());
        match points {
            Some(points) => ctx.with_overlay(Overlay::Edges {
                points,
                color: colors.edges,
            }),
            None => ctx,
        }
    }

    fn is_busy(&self) -> bool {
        self.active.is_some() || self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::geometry::Color;
    use crate::input::Modifiers;
    use crate::scene::Scene;
    use crate::shapes::{Rectangle, Shape, Square};

    const TOL: f64 = 1e-9;
    const ONE: Vector = Vector::new(1.0, 1.0);

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < TOL && (a.y - b.y).abs() < TOL
    }

    #[test]
    fn test_free_line_drag() {
        let snapshot = [Point::new(0.0, 0.0), Point::new(0.5, 0.0)];
        let raw = Vector::new(0.1, 0.2);
        let points = dragged_points(ShapeKind::Line, &snapshot, 1, raw, false, ONE);
        assert_eq!(points[0], snapshot[0]);
        assert!(close(points[1], Point::new(0.6, 0.2)));
    }

    #[test]
    fn test_shift_keeps_line_direction() {
        let snapshot = [Point::new(0.0, 0.0), Point::new(0.5, 0.0)];
        let raw = Vector::new(0.1, 0.2);
        let points = dragged_points(ShapeKind::Line, &snapshot, 1, raw, true, ONE);
        assert!(close(points[1], Point::new(0.6, 0.0)));
    }

    #[test]
    fn test_zero_length_pivot_leaves_drag_free() {
        let snapshot = [Point::new(0.2, 0.2), Point::new(0.2, 0.2)];
        let raw = Vector::new(0.1, -0.1);
        let points = dragged_points(ShapeKind::Line, &snapshot, 0, raw, true, ONE);
        assert!(close(points[0], Point::new(0.3, 0.1)));
    }

    #[test]
    fn test_rectangle_neighbours_follow() {
        let rect =
            Rectangle::from_corners(Point::new(0.0, 0.0), Point::new(0.4, 0.2), Color::BLACK);
        let snapshot = rect.points().to_vec();
        // drag the free corner (index 2)
        let raw = Vector::new(0.1, 0.3);
        let points = dragged_points(ShapeKind::Rectangle, &snapshot, 2, raw, false, ONE);
        assert!(close(points[2], Point::new(0.5, 0.5)));
        assert!(close(points[1], Point::new(0.0, 0.5)));
        assert!(close(points[3], Point::new(0.5, 0.0)));
        assert_eq!(points[0], snapshot[0]);
    }

    #[test]
    fn test_square_stays_square() {
        for (width, height) in [(800.0, 800.0), (800.0, 600.0), (600.0, 900.0)] {
            let viewport = crate::input::Viewport::new(width, height);
            let aspect = viewport.aspect();
            let (a, b) = (Point::new(-0.2, -0.2), Point::new(0.2, 0.2));
            let square = Square::from_corners(a, b, Color::BLACK, aspect);
            let snapshot = square.points().to_vec();
            for raw in [Vector::new(0.3, 0.1), Vector::new(-0.05, 0.2), Vector::new(0.1, -0.4)] {
                let scale = viewport.drag_scale();
                let p = dragged_points(ShapeKind::Square, &snapshot, 2, raw, false, scale);
                // Axis aligned.
                assert!((p[1].y - p[2].y).abs() < TOL);
                assert!((p[3].x - p[2].x).abs() < TOL);
                // Square on screen.
                let w_px = (p[3].x - p[0].x).abs() * width / 2.0;
                let h_px = (p[1].y - p[0].y).abs() * height / 2.0;
                assert!((w_px - h_px).abs() < 1e-6, "{width}x{height} {raw:?}: {w_px} vs {h_px}");
            }
        }
    }

    #[test]
    fn test_drag_through_tool() {
        let mut scene = Scene::default();
        let id = scene.add_shape(Shape::Rectangle(Rectangle::from_corners(
            Point::new(0.0, 0.0),
            Point::new(0.4, 0.4),
            Color::BLACK,
        )));
        let config = EditorConfig::default();
        let mut tool = TransformTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        assert_eq!(tool.active(), Some(id));
        tool.on_pointer_down(&mut ctx, &PointerEvent::down(0.41, 0.4));
        assert_eq!(tool.active_point(), Some(2));
        tool.on_pointer_move(
            &mut ctx,
            &PointerEvent::moved(0.51, 0.6).with_modifiers(Modifiers::NONE),
        );
        tool.on_pointer_up(&mut ctx, &PointerEvent::up(0.51, 0.6));
        assert_eq!(tool.active_point(), None);

        let points = scene.get_shape(id).unwrap().points();
        assert!(close(points[2], Point::new(0.5, 0.6)));
        assert!(close(points[1], Point::new(0.0, 0.6)));
        assert!(close(points[3], Point::new(0.5, 0.0)));
    }

    #[test]
    fn test_press_away_from_vertices() {
        let mut scene = Scene::default();
        scene.add_shape(Shape::Rectangle(Rectangle::from_corners(
            Point::new(0.0, 0.0),
            Point::new(0.4, 0.4),
            Color::BLACK,
        )));
        let config = EditorConfig::default();
        let mut tool = TransformTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        tool.on_pointer_down(&mut ctx, &PointerEvent::down(0.2, 0.2));
        assert_eq!(tool.active_point(), None);
        let ctx = tool.decorate(RenderContext::new(&scene), &config.overlay);
        assert_eq!(ctx.overlays[0].segments().len(), 4);
    }
}
