//! Rendering surface abstraction.
//!
//! The editor pushes document changes to a retained-mode surface and asks
//! it which node sits under the pointer. The browser build backs this with
//! SVG DOM nodes; [`SceneSurface`] keeps an in-memory scene for native use
//! and tests.

use crate::document::Document;
use crate::shapes::{Shape, ShapeId, ShapeKind};
use kurbo::{BezPath, Point};
use peniko::Color;

/// Default picking tolerance in canvas pixels.
///
/// Shapes without a fill are pickable only on their stroke, the same as the
/// browser's `visiblePainted` hit testing (`elementFromPoint`) on an SVG
/// element with `fill="none"`.
pub const DEFAULT_HIT_TOLERANCE: f64 = 2.0;

/// A retained drawing surface holding one node per persisted shape plus an
/// optional preview node.
pub trait RenderSurface {
    /// Create a node for `shape` at paint index `index`.
    fn insert(&mut self, index: usize, shape: &Shape);

    /// Refresh the geometry and style of an existing node.
    fn update(&mut self, shape: &Shape);

    /// Remove a node.
    fn remove(&mut self, id: ShapeId);

    /// Remove every node (the preview is left alone).
    fn clear(&mut self);

    /// Topmost node containing `point` (canvas coordinates).
    fn hit_test(&self, point: Point) -> Option<ShapeId>;

    /// Show the preview node, or update it if already shown.
    fn show_preview(&mut self, shape: &Shape);

    /// Hide the preview node.
    fn hide_preview(&mut self);

    /// Rebuild every node from the document.
    fn sync(&mut self, document: &Document) {
        self.clear();
        for (index, shape) in document.shapes().iter().enumerate() {
            self.insert(index, shape);
        }
    }
}

/// A rendered node.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub path: BezPath,
    pub fill: Option<Color>,
    pub stroke: Color,
    pub stroke_width: f64,
    shape: Shape,
}

impl SceneNode {
    fn new(shape: &Shape) -> Self {
        let style = shape.style();
        Self {
            id: shape.id(),
            kind: shape.kind(),
            path: shape.to_path(),
            fill: style.fill(),
            stroke: style.stroke(),
            stroke_width: style.stroke_width,
            shape: shape.clone(),
        }
    }

    /// The shape this node was built from.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// In-memory retained scene with geometric picking.
#[derive(Debug, Clone)]
pub struct SceneSurface {
    nodes: Vec<SceneNode>,
    preview: Option<SceneNode>,
    /// Picking tolerance in canvas pixels.
    pub hit_tolerance: f64,
}

impl Default for SceneSurface {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            preview: None,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
        }
    }
}

impl SceneSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in paint order.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, id: ShapeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The preview node, if shown.
    pub fn preview(&self) -> Option<&SceneNode> {
        self.preview.as_ref()
    }
}

impl RenderSurface for SceneSurface {
    fn insert(&mut self, index: usize, shape: &Shape) {
        let index = index.min(self.nodes.len());
        self.nodes.insert(index, SceneNode::new(shape));
    }

    fn update(&mut self, shape: &Shape) {
        let id = shape.id();
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            *node = SceneNode::new(shape);
        }
    }

    fn remove(&mut self, id: ShapeId) {
        self.nodes.retain(|n| n.id != id);
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn hit_test(&self, point: Point) -> Option<ShapeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.shape.hit_test(point, self.hit_tolerance))
            .map(|n| n.id)
    }

    fn show_preview(&mut self, shape: &Shape) {
        self.preview = Some(SceneNode::new(shape));
    }

    fn hide_preview(&mut self) {
        self.preview = None;
    }
}
