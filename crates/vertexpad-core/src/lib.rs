//! Vertexpad Core Library
//!
//! Platform-agnostic core of the vertexpad vector editor: shapes, the scene,
//! the interaction tools and the render driver they paint through.

pub mod config;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use config::{ConfigError, EditorConfig, OverlayColors};
pub use editor::Editor;
pub use geometry::{Color, ColorError, Point, Vector};
pub use input::{
    EventKind, EventResponse, EventSet, Modifiers, PointerEvent, SubscriptionChange, Viewport,
};
pub use render::{paint, DrawCommand, Primitive, RecordingSurface, RenderContext, Surface};
pub use scene::Scene;
pub use shapes::{Shape, ShapeError, ShapeId, ShapeKind, ShapeTrait};
pub use storage::{SceneSnapshot, Storage, StorageError, StorageResult};
pub use tools::{Tool, ToolKind};
