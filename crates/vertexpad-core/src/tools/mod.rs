//! Tool system for the editor.
//!
//! Exactly one tool is active at a time. Each tool declares the input
//! events it listens to ([`ToolKind::subscriptions`]), owns its transient
//! gesture state, and can decorate the frame with previews and overlays.
//! Tools refer to scene shapes by [`ShapeId`](crate::shapes::ShapeId) only.

mod line;
mod polygon;
mod rectangle;
mod resize;
mod selection;
mod square;
mod transform;

pub use line::LineTool;
pub use polygon::PolygonTool;
pub use rectangle::RectangleTool;
pub use resize::ResizeTool;
pub use selection::SelectionTool;
pub use square::SquareTool;
pub use transform::TransformTool;

use crate::config::{EditorConfig, OverlayColors};
use crate::geometry::{Color, Point};
use crate::input::{EventKind, EventResponse, EventSet, PointerEvent, Viewport};
use crate::render::RenderContext;
use crate::scene::Scene;
use crate::shapes::{Shape, ShapeError, ShapeKind, ShapeTrait};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Selection,
    Transform,
    Resize,
    Line,
    Polygon,
    Rectangle,
    Square,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Selection,
        ToolKind::Transform,
        ToolKind::Resize,
        ToolKind::Line,
        ToolKind::Polygon,
        ToolKind::Rectangle,
        ToolKind::Square,
    ];

    /// Events the tool listens to while active.
    pub fn subscriptions(self) -> EventSet {
        use EventKind::*;
        match self {
            ToolKind::Selection | ToolKind::Transform => {
                EventSet::of(&[Click, PointerDown, PointerMove, PointerUp])
            }
            ToolKind::Resize | ToolKind::Line | ToolKind::Rectangle | ToolKind::Square => {
                EventSet::of(&[Click, PointerMove])
            }
            ToolKind::Polygon => EventSet::of(&[Click, PointerMove, ContextMenu]),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Selection => "Selection",
            ToolKind::Transform => "Transform",
            ToolKind::Resize => "Resize",
            ToolKind::Line => "Line",
            ToolKind::Polygon => "Polygon",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Square => "Square",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a tool handler gets to work with.
pub struct ToolContext<'a> {
    pub scene: &'a mut Scene,
    pub viewport: Viewport,
    /// Hit-test radius in device units.
    pub hit_radius: f64,
    /// Per-axis corner grab distance for resizing.
    pub resize_threshold: f64,
}

impl<'a> ToolContext<'a> {
    pub fn new(scene: &'a mut Scene, config: &EditorConfig) -> Self {
        let viewport = config.viewport();
        Self {
            scene,
            viewport,
            hit_radius: viewport.pixels_to_device(config.hit_tolerance),
            resize_threshold: config.resize_threshold,
        }
    }
}

/// Per-tool event handlers.
///
/// Handlers default to ignoring the event; a tool only overrides what it
/// subscribes to. `reset` has no default so that every tool has to say how
/// its transient state is dropped.
pub trait ToolHandler {
    /// Drop all transient state (called when the tool is switched away).
    fn reset(&mut self);

    fn on_click(&mut self, _ctx: &mut ToolContext<'_>, _event: &PointerEvent) -> EventResponse {
        EventResponse::IGNORED
    }

    fn on_pointer_down(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> EventResponse {
        EventResponse::IGNORED
    }

    fn on_pointer_move(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> EventResponse {
        EventResponse::IGNORED
    }

    fn on_pointer_up(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> EventResponse {
        EventResponse::IGNORED
    }

    fn on_context_menu(
        &mut self,
        _ctx: &mut ToolContext<'_>,
        _event: &PointerEvent,
    ) -> EventResponse {
        EventResponse::IGNORED
    }

    /// The shape color was changed by the user.
    fn on_shape_color_changed(&mut self, _scene: &mut Scene) {}

    /// Add previews and overlays to the frame.
    fn decorate<'a>(
        &'a self,
        ctx: RenderContext<'a>,
        _colors: &OverlayColors,
    ) -> RenderContext<'a> {
        ctx
    }

    /// Whether a gesture is in progress.
    fn is_busy(&self) -> bool;
}

fn route<T: ToolHandler>(
    tool: &mut T,
    ctx: &mut ToolContext<'_>,
    event: &PointerEvent,
) -> EventResponse {
    match event.kind {
        EventKind::Click => tool.on_click(ctx, event),
        EventKind::PointerDown => tool.on_pointer_down(ctx, event),
        EventKind::PointerMove => tool.on_pointer_move(ctx, event),
        EventKind::PointerUp => tool.on_pointer_up(ctx, event),
        EventKind::ContextMenu => tool.on_context_menu(ctx, event),
    }
}

/// The active tool together with its state.
#[derive(Debug, Clone)]
pub enum Tool {
    Selection(SelectionTool),
    Transform(TransformTool),
    Resize(ResizeTool),
    Line(LineTool),
    Polygon(PolygonTool),
    Rectangle(RectangleTool),
    Square(SquareTool),
}

impl Default for Tool {
    fn default() -> Self {
        Tool::new(ToolKind::default())
    }
}

impl Tool {
    /// A fresh, idle tool of `kind`.
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Selection => Tool::Selection(SelectionTool::default()),
            ToolKind::Transform => Tool::Transform(TransformTool::default()),
            ToolKind::Resize => Tool::Resize(ResizeTool::default()),
            ToolKind::Line => Tool::Line(LineTool::default()),
            ToolKind::Polygon => Tool::Polygon(PolygonTool::default()),
            ToolKind::Rectangle => Tool::Rectangle(RectangleTool::default()),
            ToolKind::Square => Tool::Square(SquareTool::default()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Selection(_) => ToolKind::Selection,
            Tool::Transform(_) => ToolKind::Transform,
            Tool::Resize(_) => ToolKind::Resize,
            Tool::Line(_) => ToolKind::Line,
            Tool::Polygon(_) => ToolKind::Polygon,
            Tool::Rectangle(_) => ToolKind::Rectangle,
            Tool::Square(_) => ToolKind::Square,
        }
    }

    /// Route an event to the matching handler of the active tool.
    ///
    /// Events the tool does not subscribe to are ignored.
    pub fn handle(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        if !self.kind().subscriptions().contains(event.kind) {
            return EventResponse::IGNORED;
        }
        match self {
            Tool::Selection(t) => route(t, ctx, event),
            Tool::Transform(t) => route(t, ctx, event),
            Tool::Resize(t) => route(t, ctx, event),
            Tool::Line(t) => route(t, ctx, event),
            Tool::Polygon(t) => route(t, ctx, event),
            Tool::Rectangle(t) => route(t, ctx, event),
            Tool::Square(t) => route(t, ctx, event),
        }
    }

    fn handler(&self) -> &dyn ToolHandler {
        match self {
            Tool::Selection(t) => t,
            Tool::Transform(t) => t,
            Tool::Resize(t) => t,
            Tool::Line(t) => t,
            Tool::Polygon(t) => t,
            Tool::Rectangle(t) => t,
            Tool::Square(t) => t,
        }
    }

    fn handler_mut(&mut self) -> &mut dyn ToolHandler {
        match self {
            Tool::Selection(t) => t,
            Tool::Transform(t) => t,
            Tool::Resize(t) => t,
            Tool::Line(t) => t,
            Tool::Polygon(t) => t,
            Tool::Rectangle(t) => t,
            Tool::Square(t) => t,
        }
    }

    pub fn reset(&mut self) {
        self.handler_mut().reset();
    }

    pub fn on_shape_color_changed(&mut self, scene: &mut Scene) {
        self.handler_mut().on_shape_color_changed(scene);
    }

    pub fn decorate<'a>(
        &'a self,
        ctx: RenderContext<'a>,
        colors: &OverlayColors,
    ) -> RenderContext<'a> {
        self.handler().decorate(ctx, colors)
    }

    pub fn is_busy(&self) -> bool {
        self.handler().is_busy()
    }
}

/// A shape being placed with two clicks: anchor, then free corner.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Draft {
    kind: ShapeKind,
    anchor: Point,
    color: Color,
    preview: Shape,
}

impl Draft {
    /// Start a degenerate shape at `anchor`.
    pub(crate) fn start(
        kind: ShapeKind,
        anchor: Point,
        color: Color,
        aspect: f64,
    ) -> Result<Self, ShapeError> {
        let preview = Shape::build(kind, &[anchor, anchor], color, aspect)?;
        Ok(Self {
            kind,
            anchor,
            color,
            preview,
        })
    }

    /// Rebuild the preview from the anchor and `free`, keeping its id.
    pub(crate) fn update(&mut self, free: Point, aspect: f64) -> Result<(), ShapeError> {
        let id = self.preview.id();
        self.preview = Shape::build(self.kind, &[self.anchor, free], self.color, aspect)?;
        self.preview.set_id(id);
        Ok(())
    }

    pub(crate) fn preview(&self) -> &Shape {
        &self.preview
    }

    pub(crate) fn into_shape(self) -> Shape {
        self.preview
    }
}

/// Shared click/move handling of the two-click drawing tools.
pub(crate) fn draft_click(
    draft: &mut Option<Draft>,
    kind: ShapeKind,
    ctx: &mut ToolContext<'_>,
    event: &PointerEvent,
) -> EventResponse {
    let aspect = ctx.viewport.aspect();
    match draft.take() {
        Some(mut pending) => {
            if let Err(e) = pending.update(event.position, aspect) {
                log::warn!("Dropping {kind} draft: {e}");
                return EventResponse::IGNORED;
            }
            let id = ctx.scene.add_shape(pending.into_shape());
            log::info!("Committed {kind} {id}");
            EventResponse::REPAINT
        }
        None => {
            match Draft::start(kind, event.position, ctx.scene.shape_color, aspect) {
                Ok(started) => {
                    let Point { x, y } = event.position;
                    log::debug!("{kind} anchored at ({x:.3}, {y:.3})");
                    *draft = Some(started);
                }
                Err(e) => log::warn!("Cannot start {kind}: {e}"),
            }
            EventResponse::IGNORED
        }
    }
}

pub(crate) fn draft_move(
    draft: &mut Option<Draft>,
    ctx: &mut ToolContext<'_>,
    event: &PointerEvent,
) -> EventResponse {
    let Some(pending) = draft.as_mut() else {
        return EventResponse::IGNORED;
    };
    match pending.update(event.position, ctx.viewport.aspect()) {
        Ok(()) => EventResponse::REPAINT,
        Err(e) => {
            log::warn!("Preview update failed: {e}");
            EventResponse::IGNORED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriptions() {
        use EventKind::*;
        let selection = ToolKind::Selection.subscriptions();
        for kind in [Click, PointerDown, PointerMove, PointerUp] {
            assert!(selection.contains(kind));
        }
        assert!(!selection.contains(ContextMenu));

        let polygon = ToolKind::Polygon.subscriptions();
        assert!(polygon.contains(ContextMenu));
        assert!(!polygon.contains(PointerDown));

        for kind in [ToolKind::Resize, ToolKind::Line, ToolKind::Rectangle, ToolKind::Square] {
            assert_eq!(kind.subscriptions(), EventSet::of(&[Click, PointerMove]));
        }
    }

    #[test]
    fn test_tool_new_matches_kind() {
        for kind in ToolKind::ALL {
            let tool = Tool::new(kind);
            assert_eq!(tool.kind(), kind);
            assert!(!tool.is_busy());
        }
    }

    #[test]
    fn test_unsubscribed_event_is_ignored() {
        let mut scene = Scene::default();
        let config = EditorConfig::default();
        let mut tool = Tool::new(ToolKind::Line);
        let mut ctx = ToolContext::new(&mut scene, &config);
        let response = tool.handle(&mut ctx, &PointerEvent::down(0.0, 0.0));
        assert_eq!(response, EventResponse::IGNORED);
        assert!(!tool.is_busy());
    }

    #[test]
    fn test_draft_keeps_id_across_updates() {
        let mut draft = Draft::start(ShapeKind::Rectangle, Point::ZERO, Color::BLACK, 1.0).unwrap();
        let id = draft.preview().id();
        draft.update(Point::new(0.5, 0.5), 1.0).unwrap();
        assert_eq!(draft.preview().id(), id);
        assert_eq!(draft.preview().points()[2], Point::new(0.5, 0.5));
    }
}
