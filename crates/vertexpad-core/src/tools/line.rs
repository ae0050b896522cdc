//! Line tool: click the start, click again to commit the end.

use super::{draft_click, draft_move, Draft, ToolContext, ToolHandler};
use crate::config::OverlayColors;
use crate::input::{EventResponse, PointerEvent};
use crate::render::RenderContext;
use crate::shapes::ShapeKind;

#[derive(Debug, Clone, Default)]
pub struct LineTool {
    draft: Option<Draft>,
}

impl ToolHandler for LineTool {
    fn reset(&mut self) {
        self.draft = None;
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        draft_click(&mut self.draft, ShapeKind::Line, ctx, event)
    }

    fn on_pointer_move(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: &PointerEvent,
    ) -> EventResponse {
        draft_move(&mut self.draft, ctx, event)
    }

    fn decorate<'a>(
        &'a self,
        ctx: RenderContext<'a>,
        _colors: &OverlayColors,
    ) -> RenderContext<'a> {
        ctx.with_preview(self.draft.as_ref().map(Draft::preview))
    }

    fn is_busy(&self) -> bool {
        self.draft.is_some()
    }
}
