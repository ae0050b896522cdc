//! Render driver: turns the scene into draw calls on a [`Surface`].

use crate::geometry::{Color, Point};
use crate::scene::Scene;
use crate::shapes::{Boundaries, Line, Shape, ShapeId, ShapeTrait};

/// Primitive type a vertex run is assembled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    LineStrip,
    TriangleFan,
}

/// A drawing backend.
///
/// Vertex data is interleaved `[x, y, r, g, b]` per vertex, positions in
/// device space and channels in `[0, 1]`.
pub trait Surface {
    /// Clear the whole surface to `color`.
    fn clear(&mut self, color: [f32; 3]);

    /// Draw `vertex_count` vertices from `vertices` as one primitive.
    fn draw_primitive(&mut self, primitive: Primitive, vertices: &[f32], vertex_count: usize);
}

/// Transient decoration drawn on top of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Outline of a bounding box.
    BoundingBox { bounds: Boundaries, color: Color },
    /// Outline through a shape's points.
    Edges { points: Vec<Point>, color: Color },
}

impl Overlay {
    /// The outline as individual segments.
    pub fn segments(&self) -> Vec<(Point, Point)> {
        match self {
            Overlay::BoundingBox { bounds, .. } => {
                let c = bounds.corners();
                (0..4).map(|i| (c[i], c[(i + 1) % 4])).collect()
            }
            Overlay::Edges { points, .. } => match points.len() {
                0 | 1 => Vec::new(),
                2 => vec![(points[0], points[1])],
                n => (0..n).map(|i| (points[i], points[(i + 1) % n])).collect(),
            },
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Overlay::BoundingBox { color, .. } | Overlay::Edges { color, .. } => *color,
        }
    }
}

/// Context for a single frame.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Shape to leave out (it is being rebuilt by a tool).
    pub hidden_shape_id: Option<ShapeId>,
    /// In-progress shape drawn after the scene.
    pub preview: Option<&'a Shape>,
    /// Decorations drawn last.
    pub overlays: Vec<Overlay>,
}

impl<'a> RenderContext<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            hidden_shape_id: None,
            preview: None,
            overlays: Vec::new(),
        }
    }

    /// Set the shape to skip.
    pub fn with_hidden_shape(mut self, shape_id: Option<ShapeId>) -> Self {
        self.hidden_shape_id = shape_id;
        self
    }

    /// Set the in-progress shape.
    pub fn with_preview(mut self, shape: Option<&'a Shape>) -> Self {
        self.preview = shape;
        self
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlays.push(overlay);
        self
    }
}

/// Paint one full frame: clear, scene shapes in z-order, preview, overlays.
pub fn paint(ctx: &RenderContext<'_>, surface: &mut dyn Surface) {
    surface.clear(ctx.scene.canvas_color.to_normalized());

    for shape in ctx.scene.shapes() {
        if ctx.hidden_shape_id == Some(shape.id()) {
            continue;
        }
        shape.draw(surface);
    }

    if let Some(preview) = ctx.preview {
        preview.draw(surface);
    }

    for overlay in &ctx.overlays {
        let color = overlay.color();
        for (start, end) in overlay.segments() {
            Shape::Line(Line::new(start, end, color)).draw(surface);
        }
    }
}

/// A recorded surface command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear([f32; 3]),
    Draw {
        primitive: Primitive,
        vertices: Vec<f32>,
        vertex_count: usize,
    },
}

/// Surface that records commands instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames painted so far.
    pub fn frame_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear(_)))
            .count()
    }

    /// Commands since the most recent clear, clear included.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Draw calls of the most recent frame.
    pub fn last_frame_draws(&self) -> Vec<(Primitive, &[f32], usize)> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Draw {
                    primitive,
                    vertices,
                    vertex_count,
                } => Some((*primitive, vertices.as_slice(), *vertex_count)),
                DrawCommand::Clear(_) => None,
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: [f32; 3]) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_primitive(&mut self, primitive: Primitive, vertices: &[f32], vertex_count: usize) {
        self.commands.push(DrawCommand::Draw {
            primitive,
            vertices: vertices.to_vec(),
            vertex_count,
        });
    }
}
