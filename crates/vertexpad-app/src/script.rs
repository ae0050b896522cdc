//! Input scripts: recorded host events replayed against an editor.
//!
//! A script is a JSON array of steps. Pointer positions are pixel offsets
//! from the surface's top-left corner, as a browser would report them.
//!
//! ```json
//! [
//!   { "op": "tool", "tool": "Line" },
//!   { "op": "click", "x": 100, "y": 100 },
//!   { "op": "move", "x": 300, "y": 250 },
//!   { "op": "click", "x": 300, "y": 250 },
//!   { "op": "shape_color", "hex": "#ff0000" }
//! ]
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use vertexpad_core::{Editor, EventKind, Modifiers, Surface, ToolKind};

/// One replayed host action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool {
        tool: ToolKind,
    },
    Click {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    ContextMenu {
        x: f64,
        y: f64,
    },
    ShapeColor {
        hex: String,
    },
    CanvasColor {
        hex: String,
    },
    Clear,
    Resize {
        width: u32,
        height: u32,
    },
}

/// Counters collected while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub steps: usize,
    pub ignored: usize,
    pub repaints: usize,
    pub prevented_defaults: usize,
}

pub fn parse(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).context("Invalid script")
}

pub fn load(path: &Path) -> Result<Vec<Step>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    parse(&json).with_context(|| format!("In script {}", path.display()))
}

fn modifiers(shift: bool) -> Modifiers {
    if shift { Modifiers::SHIFT } else { Modifiers::NONE }
}

/// Apply every step in order. Stops at the first invalid color.
pub fn replay<S: Surface>(editor: &mut Editor<S>, steps: &[Step]) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    for (index, step) in steps.iter().enumerate() {
        let pointer = match *step {
            Step::Click { x, y, shift } => Some((EventKind::Click, x, y, shift)),
            Step::Down { x, y, shift } => Some((EventKind::PointerDown, x, y, shift)),
            Step::Move { x, y, shift } => Some((EventKind::PointerMove, x, y, shift)),
            Step::Up { x, y, shift } => Some((EventKind::PointerUp, x, y, shift)),
            Step::ContextMenu { x, y } => Some((EventKind::ContextMenu, x, y, false)),
            _ => None,
        };

        if let Some((kind, x, y, shift)) = pointer {
            if !editor.subscriptions().contains(kind) {
                stats.ignored += 1;
            }
            let response = editor.handle_pixels(kind, x, y, modifiers(shift));
            stats.repaints += usize::from(response.repainted);
            stats.prevented_defaults += usize::from(response.prevent_default);
        } else {
            match step {
                Step::Tool { tool } => {
                    let change = editor.set_tool(*tool);
                    if !change.is_empty() {
                        let bind: Vec<_> = change.bind.iter().collect();
                        let unbind: Vec<_> = change.unbind.iter().collect();
                        log::debug!("{tool}: bind {bind:?}, unbind {unbind:?}");
                    }
                }
                Step::ShapeColor { hex } => editor
                    .set_shape_color(hex)
                    .with_context(|| format!("Step {index}"))?,
                Step::CanvasColor { hex } => editor
                    .set_canvas_color(hex)
                    .with_context(|| format!("Step {index}"))?,
                Step::Clear => editor.clear_canvas(),
                Step::Resize { width, height } => editor
                    .resize_viewport(*width, *height)
                    .with_context(|| format!("Step {index}"))?,
                _ => {}
            }
        }
        stats.steps += 1;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertexpad_core::{EditorConfig, RecordingSurface, ShapeKind, ShapeTrait};

    fn editor() -> Editor<RecordingSurface> {
        Editor::new(EditorConfig::default(), RecordingSurface::new()).unwrap()
    }

    #[test]
    fn test_parse_steps() {
        let steps = parse(
            r##"[
                {"op": "tool", "tool": "Polygon"},
                {"op": "click", "x": 10, "y": 20},
                {"op": "move", "x": 11, "y": 21, "shift": true},
                {"op": "context_menu", "x": 1, "y": 2},
                {"op": "shape_color", "hex": "#ffffff"},
                {"op": "clear"}
            ]"##,
        )
        .unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0], Step::Tool { tool: ToolKind::Polygon });
        assert_eq!(
            steps[2],
            Step::Move {
                x: 11.0,
                y: 21.0,
                shift: true
            }
        );
        assert_eq!(steps[5], Step::Clear);
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        assert!(parse(r#"[{"op": "explode"}]"#).is_err());
    }

    #[test]
    fn test_replay_polygon() {
        let steps = parse(
            r#"[
                {"op": "tool", "tool": "Polygon"},
                {"op": "click", "x": 400, "y": 400},
                {"op": "click", "x": 800, "y": 400},
                {"op": "move", "x": 700, "y": 100},
                {"op": "click", "x": 800, "y": 0},
                {"op": "down", "x": 0, "y": 0},
                {"op": "context_menu", "x": 800, "y": 0}
            ]"#,
        )
        .unwrap();
        let mut editor = editor();
        let stats = replay(&mut editor, &steps).unwrap();

        assert_eq!(stats.steps, 7);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.prevented_defaults, 1);
        let scene = editor.scene();
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.shapes()[0].kind(), ShapeKind::Polygon);
        assert_eq!(scene.shapes()[0].points().len(), 3);
    }

    #[test]
    fn test_replay_stops_on_bad_color() {
        let steps = parse(r#"[{"op": "canvas_color", "hex": "teal"}, {"op": "clear"}]"#).unwrap();
        let mut editor = editor();
        let err = replay(&mut editor, &steps).unwrap_err();
        assert!(format!("{err:#}").contains("Step 0"));
    }

    #[test]
    fn test_load_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"[{"op": "tool", "tool": "Square"}]"#).unwrap();
        assert_eq!(load(&path).unwrap(), vec![Step::Tool { tool: ToolKind::Square }]);
        assert!(load(&dir.path().join("missing.json")).is_err());
    }
}
