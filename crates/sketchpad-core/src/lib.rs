//! Sketchpad Core Library
//!
//! Platform-agnostic data model and editing logic for the Sketchpad vector
//! drawing surface: shapes, the document, the interaction state machine,
//! undo, persistence and SVG export.

pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod history;
pub mod input;
pub mod shapes;
pub mod storage;
pub mod surface;
pub mod tools;
pub mod viewport;

pub use config::{ConfigError, EditorConfig};
pub use document::Document;
pub use editor::Editor;
pub use history::{UndoLog, UndoRecord};
pub use input::{KeyEvent, MouseButton, PointerEvent};
pub use shapes::{ColorParseError, Geometry, Palette, SerializableColor, Shape, ShapeId, ShapeKind};
pub use storage::{AutoSaver, Storage, StorageError, StorageResult};
pub use surface::{RenderSurface, SceneSurface};
pub use tools::{Gesture, ToolKind, ToolManager};
pub use viewport::Viewport;
