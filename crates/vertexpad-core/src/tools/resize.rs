//! Resize tool: grab a line endpoint or a quad corner and rebuild the
//! shape from the opposite point.
//!
//! The grabbed shape stays in the scene while the gesture runs; it is only
//! hidden from rendering and replaced in place when the gesture commits.

use super::{ToolContext, ToolHandler};
use crate::config::OverlayColors;
use crate::geometry::{is_near, Color, Point};
use crate::input::{EventResponse, PointerEvent};
use crate::render::{Overlay, RenderContext};
use crate::scene::Scene;
use crate::shapes::{quad_opposite, Line, Shape, ShapeId, ShapeKind, ShapeTrait};

/// A shape taken up for resizing.
#[derive(Debug, Clone, PartialEq)]
struct Lifted {
    shape_id: ShapeId,
    kind: ShapeKind,
    color: Color,
    /// Point that stays fixed.
    anchor: Point,
    preview: Shape,
}

#[derive(Debug, Clone, Default)]
enum ResizeState {
    #[default]
    Idle,
    Lifted(Lifted),
}

#[derive(Debug, Clone, Default)]
pub struct ResizeTool {
    state: ResizeState,
}

/// First shape (back to front) with a grabbable point near `position`,
/// with the anchor opposite that point.
fn find_grab(scene: &Scene, position: Point, threshold: f64) -> Option<(&Shape, Point)> {
    scene.shapes().iter().find_map(|shape| {
        let points = shape.points();
        let opposite = |i: usize| match shape.kind() {
            ShapeKind::Line => Some(Line::opposite(i)),
            ShapeKind::Rectangle | ShapeKind::Square if points.len() == 4 => Some(quad_opposite(i)),
            _ => None,
        };
        points
            .iter()
            .enumerate()
            .find_map(|(i, p)| {
                if is_near(position, *p, threshold) {
                    opposite(i)
                } else {
                    None
                }
            })
            .map(|anchor| (shape, points[anchor]))
    })
}

impl ResizeTool {
    /// The shape being resized.
    pub fn lifted(&self) -> Option<ShapeId> {
        match &self.state {
            ResizeState::Idle => None,
            ResizeState::Lifted(lifted) => Some(lifted.shape_id),
        }
    }
}

impl ToolHandler for ResizeTool {
    fn reset(&mut self) {
        self.state = ResizeState::Idle;
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        let aspect = ctx.viewport.aspect();
        match std::mem::take(&mut self.state) {
            ResizeState::Lifted(lifted) => {
                let corners = [lifted.anchor, event.position];
                let rebuilt = match Shape::build(lifted.kind, &corners, lifted.color, aspect) {
                    Ok(shape) => shape,
                    Err(e) => {
                        log::warn!("Resize of {} failed: {e}", lifted.shape_id);
                        lifted.preview
                    }
                };
                if ctx.scene.replace_shape(lifted.shape_id, rebuilt).is_some() {
                    log::info!("Resized {} {}", lifted.kind, lifted.shape_id);
                }
                EventResponse::REPAINT
            }
            ResizeState::Idle => {
                let grab = find_grab(ctx.scene, event.position, ctx.resize_threshold);
                let Some((shape, anchor)) = grab else {
                    return EventResponse::IGNORED;
                };
                let (shape_id, kind, color) = (shape.id(), shape.kind(), *shape.color());
                match Shape::build(kind, &[anchor, event.position], color, aspect) {
                    Ok(preview) => {
                        log::debug!("Lifted {kind} {shape_id}");
                        self.state = ResizeState::Lifted(Lifted {
                            shape_id,
                            kind,
                            color,
                            anchor,
                            preview,
                        });
                        EventResponse::REPAINT
                    }
                    Err(e) => {
                        log::warn!("Cannot lift {kind} {shape_id}: {e}");
                        EventResponse::IGNORED
                    }
                }
            }
        }
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: &PointerEvent,
    ) -> EventResponse {
        let ResizeState::Lifted(lifted) = &mut self.state else {
            return EventResponse::IGNORED;
        };
        let corners = [lifted.anchor, event.position];
        match Shape::build(lifted.kind, &corners, lifted.color, ctx.viewport.aspect()) {
            Ok(preview) => {
                lifted.preview = preview;
                EventResponse::REPAINT
            }
            Err(e) => {
                log::warn!("Resize preview failed: {e}");
                EventResponse::IGNORED
            }
        }
    }

    fn decorate<'a>(&'a self, ctx: RenderContext<'a>, colors: &OverlayColors) -> RenderContext<'a> {
        match &self.state {
            ResizeState::Idle => ctx,
            ResizeState::Lifted(lifted) => ctx
                .with_hidden_shape(Some(lifted.shape_id))
                .with_preview(Some(&lifted.preview))
                .with_overlay(Overlay::Edges {
                    points: lifted.preview.points().to_vec(),
                    color: colors.edges,
                }),
        }
    }

    fn is_busy(&self) -> bool {
        matches!(self.state, ResizeState::Lifted(_))
    }
}
