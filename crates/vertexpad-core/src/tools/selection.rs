//! Selection tool: pick a shape and drag it around.

use super::{ToolContext, ToolHandler};
use crate::config::OverlayColors;
use crate::geometry::Point;
use crate::input::{EventResponse, PointerEvent};
use crate::render::{Overlay, RenderContext};
use crate::scene::Scene;
use crate::shapes::{ShapeId, ShapeTrait};

/// A drag in progress.
#[derive(Debug, Clone, PartialEq)]
struct Drag {
    /// Pointer position at press.
    origin: Point,
    /// Shape points at press.
    snapshot: Vec<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    active: Option<ShapeId>,
    drag: Option<Drag>,
}

impl SelectionTool {
    /// The selected shape, if any.
    pub fn active(&self) -> Option<ShapeId> {
        self.active
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl ToolHandler for SelectionTool {
    fn reset(&mut self) {
        self.active = None;
        self.drag = None;
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        self.active = ctx.scene.shape_at_point(event.position, ctx.hit_radius);
        log::debug!("Selected {:?}", self.active);
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
        let Some(active) = self.active else {
            return EventResponse::IGNORED;
        };
        if ctx.scene.shape_at_point(event.position, ctx.hit_radius) != Some(active) {
            return EventResponse::IGNORED;
        }
        if let Some(shape) = ctx.scene.get_shape(active) {
            self.drag = Some(Drag {
                origin: event.position,
                snapshot: shape.points().to_vec(),
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
        let Some(shape) = ctx.scene.get_shape_mut(active) else {
            self.reset();
            return EventResponse::IGNORED;
        };
        let offset = event.position - drag.origin;
        for (point, original) in shape.points_mut().iter_mut().zip(&drag.snapshot) {
            *point = *original + offset;
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

    fn on_shape_color_changed(&mut self, scene: &mut Scene) {
        let Some(active) = self.active else {
            return;
        };
        let color = scene.shape_color;
        if let Some(shape) = scene.get_shape_mut(active) {
            shape.color_mut().copy_from(&color);
        }
    }

    fn decorate<'a>(&'a self, ctx: RenderContext<'a>, colors: &OverlayColors) -> RenderContext<'a> {
        let bounds = self
            .active
            .and_then(|id| ctx.scene.get_shape(id))
            .and_then(|shape| shape.boundaries().ok());
        match bounds {
            Some(bounds) => ctx.with_overlay(Overlay::BoundingBox {
                bounds,
                color: colors.selection,
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
    use crate::shapes::{Rectangle, Shape};

    fn scene_with_rect() -> (Scene, ShapeId) {
        let mut scene = Scene::default();
        let id = scene.add_shape(Shape::Rectangle(Rectangle::from_corners(
            Point::new(0.0, 0.0),
            Point::new(0.4, 0.4),
            Color::BLACK,
        )));
        (scene, id)
    }

    #[test]
    fn test_click_selects_and_clears() {
        let (mut scene, id) = scene_with_rect();
        let config = EditorConfig::default();
        let mut tool = SelectionTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        assert_eq!(tool.active(), Some(id));
        tool.on_click(&mut ctx, &PointerEvent::click(-0.8, -0.8));
        assert_eq!(tool.active(), None);
    }

    #[test]
    fn test_drag_is_relative_to_snapshot() {
        let (mut scene, id) = scene_with_rect();
        let config = EditorConfig::default();
        let mut tool = SelectionTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        tool.on_pointer_down(&mut ctx, &PointerEvent::down(0.2, 0.2));
        assert!(tool.is_dragging());
        tool.on_pointer_move(&mut ctx, &PointerEvent::moved(0.25, 0.2));
        tool.on_pointer_move(&mut ctx, &PointerEvent::moved(0.3, 0.1));
        tool.on_pointer_up(&mut ctx, &PointerEvent::up(0.3, 0.1));
        assert!(!tool.is_dragging());

        let points = scene.get_shape(id).unwrap().points();
        let expected = [(0.1, -0.1), (0.1, 0.3), (0.5, 0.3), (0.5, -0.1)];
        for (p, (x, y)) in points.iter().zip(expected) {
            assert!((p.x - x).abs() < 1e-12 && (p.y - y).abs() < 1e-12, "{p:?}");
        }
    }

    #[test]
    fn test_press_outside_active_does_not_drag() {
        let (mut scene, _) = scene_with_rect();
        let config = EditorConfig::default();
        let mut tool = SelectionTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_pointer_down(&mut ctx, &PointerEvent::down(0.2, 0.2));
        assert!(!tool.is_dragging());

        tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        tool.on_pointer_down(&mut ctx, &PointerEvent::down(0.9, 0.9));
        assert!(!tool.is_dragging());
        let response = tool.on_pointer_move(&mut ctx, &PointerEvent::moved(0.5, 0.5));
        assert_eq!(response, EventResponse::IGNORED);
    }

    #[test]
    fn test_color_change_is_copied() {
        let (mut scene, id) = scene_with_rect();
        let config = EditorConfig::default();
        let mut tool = SelectionTool::default();
        {
            let mut ctx = ToolContext::new(&mut scene, &config);
            tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        }
        scene.shape_color = Color::new(0, 200, 0);
        tool.on_shape_color_changed(&mut scene);
        scene.shape_color = Color::new(1, 1, 1);
        assert_eq!(*scene.get_shape(id).unwrap().color(), Color::new(0, 200, 0));
    }

    #[test]
    fn test_bounding_box_overlay() {
        let (mut scene, _) = scene_with_rect();
        let config = EditorConfig::default();
        let mut tool = SelectionTool::default();
        {
            let mut ctx = ToolContext::new(&mut scene, &config);
            tool.on_click(&mut ctx, &PointerEvent::click(0.2, 0.2));
        }
        let ctx = tool.decorate(RenderContext::new(&scene), &config.overlay);
        assert_eq!(ctx.overlays.len(), 1);
        assert_eq!(ctx.overlays[0].color(), config.overlay.selection);
        assert_eq!(ctx.overlays[0].segments().len(), 4);
    }
}
