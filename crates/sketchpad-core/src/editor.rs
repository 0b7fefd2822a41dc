//! Editor session: the interaction state machine.
//!
//! An [`Editor`] owns the document, the selection, the active gesture and
//! the undo log, and keeps a [`RenderSurface`] in step with them. Event
//! adapters call [`Editor::begin_gesture`], [`Editor::update_gesture`] and
//! [`Editor::end_gesture`] (or the [`Editor::handle_pointer`] convenience
//! wrapper) with page coordinates.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::history::{UndoLog, UndoRecord};
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::shapes::{Palette, SerializableColor, ShapeId};
use crate::surface::{RenderSurface, SceneSurface};
use crate::tools::{Gesture, ToolKind, ToolManager, shape_from_points};
use crate::viewport::Viewport;
use kurbo::Point;

/// One editing session over a single document.
#[derive(Debug)]
pub struct Editor<S: RenderSurface = SceneSurface> {
    document: Document,
    history: UndoLog,
    tools: ToolManager,
    /// Weak reference to the selected shape.
    selection: Option<ShapeId>,
    surface: S,
    viewport: Viewport,
    highlight: SerializableColor,
    /// Bumped on every document mutation.
    revision: u64,
}

impl Editor<SceneSurface> {
    /// Create an editor rendering into an in-memory scene.
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_surface(config, SceneSurface::new())
    }
}

impl<S: RenderSurface> Editor<S> {
    /// Create an editor rendering into `surface`.
    pub fn with_surface(config: &EditorConfig, surface: S) -> Self {
        let history = match config.max_undo_depth {
            Some(depth) => UndoLog::with_max_depth(depth),
            None => UndoLog::new(),
        };
        Self {
            document: Document::new(),
            history,
            tools: ToolManager::with_style(config.default_style()),
            selection: None,
            surface,
            viewport: Viewport::new(),
            highlight: config.highlight_color,
            revision: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &UndoLog {
        &self.history
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.tools.gesture()
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    /// Current value of the stroke width control.
    pub fn stroke_width(&self) -> f64 {
        self.tools.current_style.stroke_width
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Counter bumped on every document mutation, including drag steps
    /// and undo.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Choose the tool for the next drawing gesture.
    pub fn select_tool(&mut self, tool: ToolKind) {
        log::debug!("tool: {:?}", tool);
        self.tools.set_tool(tool);
    }

    /// Pointer pressed. Returns true if a gesture started.
    ///
    /// Primary starts drawing when nothing is under the pointer; secondary
    /// starts dragging the selection. Ignored while a gesture is active.
    pub fn begin_gesture(&mut self, button: MouseButton, page_point: Point) -> bool {
        if self.tools.is_active() {
            return false;
        }
        let point = self.viewport.page_to_canvas(page_point);
        match button {
            MouseButton::Left => {
                if self.surface.hit_test(point).is_some() {
                    return false;
                }
                self.tools.begin_drawing(point);
                if let Some(preview) = self.tools.preview_shape() {
                    self.surface.show_preview(&preview);
                }
                log::debug!("gesture: drawing {:?} from {:?}", self.tools.current_tool, point);
                true
            }
            MouseButton::Right => {
                let Some(id) = self.selection else {
                    return false;
                };
                let Some(shape) = self.document.get_shape(id) else {
                    return false;
                };
                let offset = point - shape.reference_point();
                // Capture geometry before the first move
                self.history.push(UndoRecord::Moved {
                    id,
                    old_geometry: shape.geometry(),
                });
                self.tools.begin_drag(offset);
                log::debug!("gesture: dragging {} with offset {:?}", id, offset);
                true
            }
            MouseButton::Middle => false,
        }
    }

    /// Pointer moved. Recomputes from the gesture's absolute state, so
    /// repeated or dropped events never drift.
    pub fn update_gesture(&mut self, page_point: Point) {
        let point = self.viewport.page_to_canvas(page_point);
        match self.tools.gesture().copied() {
            Some(Gesture::Drawing { .. }) => {
                self.tools.update(point);
                if let Some(preview) = self.tools.preview_shape() {
                    self.surface.show_preview(&preview);
                }
            }
            Some(Gesture::Dragging { offset }) => {
                let Some(id) = self.selection else {
                    return;
                };
                if let Some(shape) = self.document.get_shape_mut(id) {
                    shape.move_reference_to(point - offset);
                    self.surface.update(shape);
                    self.touch();
                }
            }
            None => {}
        }
    }

    /// Pointer released. Returns the new shape when a drawing commits.
    pub fn end_gesture(&mut self, button: MouseButton) -> Option<ShapeId> {
        match (button, self.tools.gesture().copied()) {
            (
                MouseButton::Left,
                Some(Gesture::Drawing {
                    tool,
                    anchor,
                    current,
                }),
            ) => {
                self.tools.take();
                self.surface.hide_preview();
                let shape = shape_from_points(tool, anchor, current, &self.tools.current_style);
                let id = shape.id();
                let index = self.document.add_shape(shape);
                if let Some(shape) = self.document.shapes().get(index) {
                    self.surface.insert(index, shape);
                }
                self.clear_selection();
                self.history.push(UndoRecord::Created { id });
                self.touch();
                log::info!("created {:?} {}", tool, id);
                Some(id)
            }
            (MouseButton::Right, Some(Gesture::Dragging { .. })) => {
                // The Moved record was pushed when the drag began
                self.tools.take();
                log::debug!("gesture: drag ended");
                None
            }
            _ => None,
        }
    }

    /// Restore the selected shape's baseline colors and drop the selection.
    fn clear_selection(&mut self) {
        if let Some(id) = self.selection.take() {
            if let Some(shape) = self.document.get_shape_mut(id) {
                shape.style_mut().restore_baseline();
                self.surface.update(shape);
            }
        }
    }

    /// Select the topmost shape under the pointer and highlight it.
    /// Returns the selected shape, or None on a miss or while a gesture is
    /// active.
    pub fn select_shape_at(&mut self, page_point: Point) -> Option<ShapeId> {
        if self.tools.is_active() {
            return None;
        }
        let point = self.viewport.page_to_canvas(page_point);
        let id = self.surface.hit_test(point)?;
        if !self.document.contains(id) {
            log::warn!("surface picked unknown shape {}", id);
            return None;
        }

        self.clear_selection();
        let shape = self.document.get_shape_mut(id)?;
        let style = shape.style_mut();
        let restored = style.palette();
        self.history.push(UndoRecord::StyleChanged {
            id,
            old: restored,
            old_baseline: style.baseline,
        });
        style.baseline = restored;
        style.apply_palette(Palette::solid(self.highlight));
        self.surface.update(shape);
        self.selection = Some(id);
        self.touch();
        log::debug!("selected {}", id);
        Some(id)
    }

    /// Recolor the selection. Lines take the color as their stroke; other
    /// shapes take it as fill and keep their baseline stroke.
    pub fn set_fill(&mut self, color: SerializableColor) {
        let Some(id) = self.selection else {
            return;
        };
        let Some(shape) = self.document.get_shape_mut(id) else {
            return;
        };
        let is_line = shape.is_line();
        let style = shape.style_mut();
        self.history.push(UndoRecord::StyleChanged {
            id,
            old: style.palette(),
            old_baseline: style.baseline,
        });
        let stroke = if is_line { color } else { style.baseline.stroke };
        let palette = Palette::new(Some(color), stroke);
        style.apply_palette(palette);
        style.baseline = palette;
        self.surface.update(shape);
        self.touch();
    }

    /// Set the width control. New shapes use it; a selected shape takes it
    /// immediately. Negative widths clamp to zero.
    pub fn set_stroke_width(&mut self, width: f64) {
        let width = width.max(0.0);
        self.tools.current_style.stroke_width = width;
        let Some(id) = self.selection else {
            return;
        };
        let Some(shape) = self.document.get_shape_mut(id) else {
            return;
        };
        self.history.push(UndoRecord::StrokeWidthChanged {
            id,
            old_width: shape.style().stroke_width,
        });
        shape.style_mut().stroke_width = width;
        self.surface.update(shape);
        self.touch();
    }

    /// Delete the selected shape. Returns its ID.
    pub fn delete_selected(&mut self) -> Option<ShapeId> {
        let id = self.selection?;
        let (index, shape) = self.document.remove_shape(id)?;
        self.selection = None;
        self.surface.remove(id);
        self.history.push(UndoRecord::Deleted { shape, index });
        self.touch();
        log::info!("deleted {} at {}", id, index);
        Some(id)
    }

    /// Reverse the most recent record. Ignored while a gesture is active.
    pub fn undo(&mut self) -> Option<UndoRecord> {
        if self.tools.is_active() {
            return None;
        }
        let record = self.history.undo(&mut self.document)?;
        self.surface.sync(&self.document);

        if let UndoRecord::Deleted { shape, .. } = &record {
            // A shape deleted while highlighted comes back selected
            let style = shape.style();
            if style.palette() != style.baseline {
                self.selection = Some(shape.id());
            }
        }
        if let Some(id) = self.selection {
            if !self.document.contains(id) {
                self.selection = None;
            }
        }
        self.touch();
        log::info!("undo {}", record.name());
        Some(record)
    }

    /// Dispatch a pointer event. Secondary press selects the shape under
    /// the pointer before starting the drag.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                if button == MouseButton::Right {
                    self.select_shape_at(position);
                }
                self.begin_gesture(button, position);
            }
            PointerEvent::Move { position } => self.update_gesture(position),
            PointerEvent::Up { button, .. } => {
                self.end_gesture(button);
            }
        }
    }

    /// Dispatch a key event. Returns true if it was handled.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        if event.is_delete_press() {
            return self.delete_selected().is_some();
        }
        false
    }

    /// Copy of the document without the transient selection highlight.
    pub fn snapshot(&self) -> Document {
        let mut document = self.document.clone();
        if let Some(shape) = self.selection.and_then(|id| document.get_shape_mut(id)) {
            shape.style_mut().restore_baseline();
        }
        document
    }

    /// Replace the document, dropping selection, gesture and undo history.
    pub fn restore(&mut self, document: Document) {
        self.tools.cancel();
        self.surface.hide_preview();
        self.selection = None;
        self.history.clear();
        self.document = document;
        self.surface.sync(&self.document);
        self.touch();
        log::info!("restored {} shapes", self.document.len());
    }
}
