//! Polygon tool.
//!
//! Each click fixes a vertex. While drawing, the last vertex of the draft
//! trails the pointer; a secondary click commits the fixed vertices.

use super::{ToolContext, ToolHandler};
use crate::config::OverlayColors;
use crate::geometry::Point;
use crate::input::{EventResponse, PointerEvent};
use crate::render::RenderContext;
use crate::shapes::{Polygon, Shape, ShapeTrait};

/// Fixed vertices needed before a polygon can be committed.
const MIN_FIXED_POINTS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct PolygonTool {
    /// Fixed vertices followed by the trailing one.
    draft: Option<Shape>,
}

impl PolygonTool {
    fn polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self.draft.as_mut() {
            Some(Shape::Polygon(polygon)) => Some(polygon),
            _ => None,
        }
    }

    fn set_trailing(&mut self, position: Point) -> bool {
        let Some(polygon) = self.polygon_mut() else {
            return false;
        };
        match polygon.points_mut().last_mut() {
            Some(last) => {
                *last = position;
                true
            }
            None => false,
        }
    }
}

impl ToolHandler for PolygonTool {
    fn reset(&mut self) {
        self.draft = None;
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        match self.polygon_mut() {
            Some(polygon) => {
                if let Some(last) = polygon.points_mut().last_mut() {
                    *last = event.position;
                }
                polygon.push(event.position);
                log::debug!("Polygon vertex {} fixed", polygon.len() - 1);
                EventResponse::REPAINT
            }
            None => {
                let points = vec![event.position, event.position];
                let polygon = Polygon::from_points(points, ctx.scene.shape_color);
                self.draft = Some(Shape::Polygon(polygon));
                log::debug!("Polygon started");
                EventResponse::IGNORED
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        event: &PointerEvent,
    ) -> EventResponse {
        if self.set_trailing(event.position) {
            EventResponse::REPAINT
        } else {
            EventResponse::IGNORED
        }
    }

    fn on_context_menu(
        &mut self,
        ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> EventResponse {
        let Some(draft) = self.draft.as_ref() else {
            return EventResponse::IGNORED;
        };
        let points = draft.points();
        let fixed = &points[..points.len().saturating_sub(1)];
        if fixed.len() < MIN_FIXED_POINTS {
            log::debug!("Polygon needs {MIN_FIXED_POINTS} vertices, has {}", fixed.len());
            return EventResponse::IGNORED.prevent_default();
        }

        let mut polygon = Shape::Polygon(Polygon::from_points(fixed.to_vec(), *draft.color()));
        polygon.set_id(draft.id());
        self.draft = None;
        let id = ctx.scene.add_shape(polygon);
        log::info!("Committed Polygon {id}");
        EventResponse::REPAINT.prevent_default()
    }

    fn decorate<'a>(
        &'a self,
        ctx: RenderContext<'a>,
        _colors: &OverlayColors,
    ) -> RenderContext<'a> {
        ctx.with_preview(self.draft.as_ref())
    }

    fn is_busy(&self) -> bool {
        self.draft.is_some()
    }
}
