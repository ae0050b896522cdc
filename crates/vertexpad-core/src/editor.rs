//! The editor: scene, active tool and drawing surface wired together.

use crate::config::{ConfigError, EditorConfig};
use crate::geometry::{Color, ColorError};
use crate::input::{
    EventKind, EventResponse, EventSet, Modifiers, PointerEvent, SubscriptionChange, Viewport,
};
use crate::render::{paint, RenderContext, Surface};
use crate::scene::Scene;
use crate::storage::SceneSnapshot;
use crate::tools::{Tool, ToolContext, ToolKind};

/// Owns the scene and the active tool, and repaints `S` after every change.
#[derive(Debug)]
pub struct Editor<S: Surface> {
    config: EditorConfig,
    scene: Scene,
    tool: Tool,
    surface: S,
}

impl<S: Surface> Editor<S> {
    /// Create an editor with an empty scene and the Selection tool active.
    pub fn new(config: EditorConfig, surface: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let scene = Scene::new(config.shape_color, config.canvas_color);
        let mut editor = Self {
            config,
            scene,
            tool: Tool::default(),
            surface,
        };
        editor.repaint();
        Ok(editor)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.config.viewport()
    }

    /// Events the host must deliver for the active tool.
    pub fn subscriptions(&self) -> EventSet {
        self.tool.kind().subscriptions()
    }

    /// Switch the active tool.
    ///
    /// The outgoing tool's state is dropped. The returned diff lists the
    /// listeners the host has to bind and unbind; it is empty when `kind`
    /// is already active.
    pub fn set_tool(&mut self, kind: ToolKind) -> SubscriptionChange {
        let current = self.tool.kind();
        if current == kind {
            return SubscriptionChange::default();
        }
        self.tool.reset();
        self.tool = Tool::new(kind);
        log::debug!("Tool {current} -> {kind}");
        self.repaint();
        SubscriptionChange::between(current.subscriptions(), kind.subscriptions())
    }

    /// Dispatch an event given in device coordinates.
    pub fn handle(&mut self, event: PointerEvent) -> EventResponse {
        if !self.subscriptions().contains(event.kind) {
            return EventResponse::IGNORED;
        }
        let response = {
            let mut ctx = ToolContext::new(&mut self.scene, &self.config);
            self.tool.handle(&mut ctx, &event)
        };
        if response.repainted {
            self.repaint();
        }
        response
    }

    /// Dispatch an event given as a pixel offset from the surface's top-left corner.
    pub fn handle_pixels(
        &mut self,
        kind: EventKind,
        offset_x: f64,
        offset_y: f64,
        modifiers: Modifiers,
    ) -> EventResponse {
        let position = self.viewport().normalize(offset_x, offset_y);
        self.handle(PointerEvent::new(kind, position).with_modifiers(modifiers))
    }

    /// Set the color for new shapes from `#RRGGBB`.
    ///
    /// The Selection tool also recolors its active shape.
    pub fn set_shape_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.scene.shape_color.set_from_hex(hex)?;
        self.tool.on_shape_color_changed(&mut self.scene);
        self.repaint();
        Ok(())
    }

    /// Set the background color from `#RRGGBB`.
    pub fn set_canvas_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.scene.canvas_color.set_from_hex(hex)?;
        self.repaint();
        Ok(())
    }

    pub fn shape_color(&self) -> Color {
        self.scene.shape_color
    }

    pub fn canvas_color(&self) -> Color {
        self.scene.canvas_color
    }

    /// Remove every shape and drop the active tool's state.
    pub fn clear_canvas(&mut self) {
        self.tool.reset();
        self.scene.clear();
        log::info!("Canvas cleared");
        self.repaint();
    }

    /// Change the surface size.
    pub fn resize_viewport(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        config.width = width;
        config.height = height;
        config.validate()?;
        self.config = config;
        self.repaint();
        Ok(())
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(&self.scene)
    }

    /// Replace the scene with a saved one.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        self.tool.reset();
        self.scene = snapshot.to_scene(self.viewport().aspect());
        log::info!("Restored {} shapes", self.scene.len());
        self.repaint();
    }

    /// Paint the scene plus the active tool's decorations.
    pub fn repaint(&mut self) {
        let ctx = self.tool.decorate(RenderContext::new(&self.scene), &self.config.overlay);
        paint(&ctx, &mut self.surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::render::{DrawCommand, RecordingSurface};
    use crate::shapes::{ShapeKind, ShapeTrait};

    fn editor() -> Editor<RecordingSurface> {
        Editor::new(EditorConfig::default(), RecordingSurface::new()).unwrap()
    }

    #[test]
    fn test_new_paints_background() {
        let editor = editor();
        assert_eq!(editor.tool_kind(), ToolKind::Selection);
        assert_eq!(editor.surface().commands(), &[DrawCommand::Clear([1.0, 1.0, 1.0])]);
    }

    #[test]
    fn test_set_tool_returns_diff() {
        let mut editor = editor();
        let change = editor.set_tool(ToolKind::Polygon);
        assert!(change.bind.contains(EventKind::ContextMenu));
        assert!(change.unbind.contains(EventKind::PointerDown));
        assert!(change.unbind.contains(EventKind::PointerUp));
        assert!(!change.bind.contains(EventKind::Click));
        assert!(!change.unbind.contains(EventKind::Click));

        assert!(editor.set_tool(ToolKind::Polygon).is_empty());
    }

    #[test]
    fn test_unsubscribed_events_are_dropped() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Line);
        let frames = editor.surface().frame_count();
        assert_eq!(editor.handle(PointerEvent::context_menu(0.0, 0.0)), EventResponse::IGNORED);
        assert_eq!(editor.surface().frame_count(), frames);
    }

    #[test]
    fn test_pixel_events_are_normalised() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Line);
        editor.handle_pixels(EventKind::Click, 400.0, 400.0, Modifiers::NONE);
        editor.handle_pixels(EventKind::Click, 800.0, 0.0, Modifiers::NONE);
        let line = &editor.scene().shapes()[0];
        assert_eq!(line.points(), &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    }

    #[test]
    fn test_shape_color_command() {
        let mut editor = editor();
        assert!(editor.set_shape_color("blue").is_err());
        editor.set_shape_color("#00ff00").unwrap();
        editor.set_tool(ToolKind::Rectangle);
        editor.handle(PointerEvent::click(0.0, 0.0));
        editor.handle(PointerEvent::click(0.2, 0.2));
        assert_eq!(*editor.scene().shapes()[0].color(), Color::new(0, 255, 0));
    }

    #[test]
    fn test_canvas_color_repaints() {
        let mut editor = editor();
        editor.set_canvas_color("#ff0000").unwrap();
        assert_eq!(editor.surface().last_frame(), &[DrawCommand::Clear([1.0, 0.0, 0.0])]);
    }

    #[test]
    fn test_clear_canvas() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Square);
        editor.handle(PointerEvent::click(0.0, 0.0));
        editor.handle(PointerEvent::click(0.2, 0.2));
        editor.handle(PointerEvent::click(0.5, 0.5));
        assert!(editor.tool().is_busy());
        editor.clear_canvas();
        assert!(editor.scene().is_empty());
        assert!(!editor.tool().is_busy());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut editor = editor();
        editor.set_tool(ToolKind::Line);
        editor.handle(PointerEvent::click(0.0, 0.0));
        editor.handle(PointerEvent::click(0.3, 0.3));
        let snapshot = editor.snapshot();

        editor.clear_canvas();
        editor.restore(&snapshot);
        assert_eq!(editor.scene().len(), 1);
        assert_eq!(editor.scene().shapes()[0].kind(), ShapeKind::Line);
    }

    #[test]
    fn test_resize_viewport() {
        let mut editor = editor();
        assert!(editor.resize_viewport(0, 10).is_err());
        editor.resize_viewport(400, 200).unwrap();
        assert!((editor.viewport().aspect() - 0.5).abs() < f64::EPSILON);
    }
}
