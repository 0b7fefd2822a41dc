//! Page-to-canvas coordinate mapping.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Maps pointer positions reported in page coordinates to canvas-local
/// coordinates. Translation only: there is no zoom or rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Position of the canvas origin in page coordinates.
    pub origin: Vec2,
}

impl Viewport {
    /// Create a viewport whose canvas origin sits at the page origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a page point to canvas coordinates.
    pub fn page_to_canvas(&self, page_point: Point) -> Point {
        page_point - self.origin
    }

    /// Move the canvas origin (e.g. after the page scrolls or the canvas
    /// element is laid out again).
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }
}
