//! Undo log: a stack of reversible edit records.

use crate::document::Document;
use crate::shapes::{Geometry, Palette, Shape, ShapeId};

/// One committed mutation, holding exactly the state needed to reverse it.
///
/// Old values are captured before the mutation is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoRecord {
    /// A shape was appended to the document.
    Created { id: ShapeId },
    /// A shape was removed from `index` in paint order.
    Deleted { shape: Shape, index: usize },
    /// Fill/stroke changed (style edit or selection highlight).
    StyleChanged {
        id: ShapeId,
        old: Palette,
        old_baseline: Palette,
    },
    /// Stroke width changed.
    StrokeWidthChanged { id: ShapeId, old_width: f64 },
    /// A drag moved the shape.
    Moved { id: ShapeId, old_geometry: Geometry },
}

impl UndoRecord {
    /// The shape this record refers to.
    pub fn shape_id(&self) -> ShapeId {
        match self {
            UndoRecord::Created { id }
            | UndoRecord::StyleChanged { id, .. }
            | UndoRecord::StrokeWidthChanged { id, .. }
            | UndoRecord::Moved { id, .. } => *id,
            UndoRecord::Deleted { shape, .. } => shape.id(),
        }
    }

    /// Human-readable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            UndoRecord::Created { .. } => "create",
            UndoRecord::Deleted { .. } => "delete",
            UndoRecord::StyleChanged { .. } => "style change",
            UndoRecord::StrokeWidthChanged { .. } => "stroke width change",
            UndoRecord::Moved { .. } => "move",
        }
    }

    /// Apply the inverse of this record to the document.
    /// Returns false if the shape it refers to is gone.
    pub fn revert(&self, document: &mut Document) -> bool {
        match self {
            UndoRecord::Created { id } => document.remove_shape(*id).is_some(),
            UndoRecord::Deleted { shape, index } => {
                document.insert_shape(*index, shape.clone());
                true
            }
            UndoRecord::StyleChanged {
                id,
                old,
                old_baseline,
            } => match document.get_shape_mut(*id) {
                Some(shape) => {
                    let style = shape.style_mut();
                    style.apply_palette(*old);
                    style.baseline = *old_baseline;
                    true
                }
                None => false,
            },
            UndoRecord::StrokeWidthChanged { id, old_width } => {
                match document.get_shape_mut(*id) {
                    Some(shape) => {
                        shape.style_mut().stroke_width = *old_width;
                        true
                    }
                    None => false,
                }
            }
            UndoRecord::Moved { id, old_geometry } => document
                .get_shape_mut(*id)
                .is_some_and(|shape| shape.set_geometry(*old_geometry)),
        }
    }
}

/// Last-in-first-out log of undo records. There is no redo.
#[derive(Debug, Clone, Default)]
pub struct UndoLog {
    records: Vec<UndoRecord>,
    max_depth: Option<usize>,
}

impl UndoLog {
    /// Create an unbounded undo log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `max_depth` records, dropping the oldest.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            records: Vec::new(),
            max_depth: Some(max_depth),
        }
    }

    /// Append a record.
    pub fn push(&mut self, record: UndoRecord) {
        log::debug!("undo log: push {}", record.name());
        self.records.push(record);

        if let Some(max) = self.max_depth {
            if self.records.len() > max {
                let excess = self.records.len() - max;
                self.records.drain(..excess);
            }
        }
    }

    /// Pop exactly one record and reverse it on `document`.
    /// Returns the popped record, or None if the log was empty.
    pub fn undo(&mut self, document: &mut Document) -> Option<UndoRecord> {
        let record = self.records.pop()?;
        if record.revert(document) {
            log::debug!("undo log: reverted {}", record.name());
        } else {
            log::warn!(
                "undo log: discarded {} for missing shape {}",
                record.name(),
                record.shape_id()
            );
        }
        Some(record)
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&UndoRecord> {
        self.records.last()
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
