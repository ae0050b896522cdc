//! Square tool: anchor corner, then a free point whose shorter delta sets the side.

use super::{draft_click, draft_move, Draft, ToolContext, ToolHandler};
use crate::config::OverlayColors;
use crate::input::{EventResponse, PointerEvent};
use crate::render::RenderContext;
use crate::shapes::ShapeKind;

#[derive(Debug, Clone, Default)]
pub struct SquareTool {
    draft: Option<Draft>,
}

impl ToolHandler for SquareTool {
    fn reset(&mut self) {
        self.draft = None;
    }

    fn on_click(&mut self, ctx: &mut ToolContext<'_>, event: &PointerEvent) -> EventResponse {
        draft_click(&mut self.draft, ShapeKind::Square, ctx, event)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::scene::Scene;
    use crate::shapes::ShapeTrait;

    #[test]
    fn test_square_uses_viewport_aspect() {
        let mut scene = Scene::default();
        let config = EditorConfig {
            width: 800,
            height: 600,
            ..Default::default()
        };
        let mut tool = SquareTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_click(&mut ctx, &PointerEvent::click(0.0, 0.0));
        tool.on_click(&mut ctx, &PointerEvent::click(-0.6, 0.4));

        let square = &scene.shapes()[0];
        assert_eq!(square.kind(), ShapeKind::Square);
        let p = square.points();
        assert!((p[1].y - 0.4).abs() < 1e-12);
        assert!((p[2].x + 0.4 * 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_second_click_without_move() {
        let mut scene = Scene::default();
        let config = EditorConfig::default();
        let mut tool = SquareTool::default();
        let mut ctx = ToolContext::new(&mut scene, &config);

        tool.on_click(&mut ctx, &PointerEvent::click(0.1, 0.1));
        assert!(tool.on_click(&mut ctx, &PointerEvent::click(0.3, 0.2)).repainted);
        let p = scene.shapes()[0].points().to_vec();
        assert!((p[2].x - 0.2).abs() < 1e-12);
        assert!((p[2].y - 0.2).abs() < 1e-12);
    }
}
