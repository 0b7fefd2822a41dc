//! Tool and gesture state for the drawing surface.

use crate::shapes::{Ellipse, Line, Rectangle, Shape, ShapeStyle};
use kurbo::{Point, Vec2};

pub use crate::shapes::ShapeKind as ToolKind;

/// An in-progress pointer interaction, not yet committed to the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Sizing a new shape between `anchor` and `current`.
    Drawing {
        tool: ToolKind,
        anchor: Point,
        current: Point,
    },
    /// Moving the selected shape; `offset` is pointer minus reference point
    /// at grab time.
    Dragging { offset: Vec2 },
}

/// Build a shape of kind `tool` spanning `anchor`..`current`.
///
/// Rectangles and ellipses are normalized so their size never goes
/// negative; lines keep the endpoints verbatim.
pub fn shape_from_points(tool: ToolKind, anchor: Point, current: Point, style: &ShapeStyle) -> Shape {
    let mut shape = match tool {
        ToolKind::Rectangle => Shape::Rectangle(Rectangle::from_corners(anchor, current)),
        ToolKind::Ellipse => Shape::Ellipse(Ellipse::from_corners(anchor, current)),
        ToolKind::Line => Shape::Line(Line::new(anchor, current)),
    };
    *shape.style_mut() = style.clone();
    shape
}

/// Manages the current tool and the active gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Active gesture, if any.
    gesture: Option<Gesture>,
    /// Style applied to new shapes.
    pub current_style: ShapeStyle,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager whose new shapes use `style`.
    pub fn with_style(style: ShapeStyle) -> Self {
        Self {
            current_style: style,
            ..Self::default()
        }
    }

    /// Set the current tool. An active gesture keeps the tool it started with.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    /// The active gesture.
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Check if a gesture is active.
    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start sizing a new shape with the current tool.
    /// Returns false if a gesture is already active.
    pub fn begin_drawing(&mut self, anchor: Point) -> bool {
        if self.is_active() {
            return false;
        }
        self.gesture = Some(Gesture::Drawing {
            tool: self.current_tool,
            anchor,
            current: anchor,
        });
        true
    }

    /// Start a drag with the given grab offset.
    /// Returns false if a gesture is already active.
    pub fn begin_drag(&mut self, offset: Vec2) -> bool {
        if self.is_active() {
            return false;
        }
        self.gesture = Some(Gesture::Dragging { offset });
        true
    }

    /// Update the current point of a drawing gesture.
    pub fn update(&mut self, point: Point) {
        if let Some(Gesture::Drawing { current, .. }) = &mut self.gesture {
            *current = point;
        }
    }

    /// End and return the active gesture.
    pub fn take(&mut self) -> Option<Gesture> {
        self.gesture.take()
    }

    /// Cancel the active gesture.
    pub fn cancel(&mut self) {
        self.gesture = None;
    }

    /// The shape the active drawing gesture would commit.
    pub fn preview_shape(&self) -> Option<Shape> {
        match self.gesture {
            Some(Gesture::Drawing {
                tool,
                anchor,
                current,
            }) => Some(shape_from_points(tool, anchor, current, &self.current_style)),
            _ => None,
        }
    }
}
