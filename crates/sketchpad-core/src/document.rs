//! The drawing document: an ordered list of shapes.

use crate::shapes::{Shape, ShapeId};
use serde::{Deserialize, Serialize};

/// A drawing containing all persisted shapes.
///
/// Shapes are kept in paint order (back to front); insertion order is
/// paint order and there is no separate z-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// All shapes, back to front.
    shapes: Vec<Shape>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top. Returns its paint index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        self.shapes.push(shape);
        self.shapes.len() - 1
    }

    /// Insert a shape at a paint index (clamped to the end).
    /// Returns the index actually used.
    pub fn insert_shape(&mut self, index: usize, shape: Shape) -> usize {
        let index = index.min(self.shapes.len());
        self.shapes.insert(index, shape);
        index
    }

    /// Remove a shape, returning it with the index it occupied.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let index = self.index_of(id)?;
        Some((index, self.shapes.remove(index)))
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Paint index of a shape.
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Shapes in paint order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shape IDs in paint order.
    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(Shape::id).collect()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Line, Palette, Rectangle, SerializableColor, ShapeStyle, ShapeTrait};
    use kurbo::Point;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.to_json().unwrap().replace(char::is_whitespace, ""), r#"{"shapes":[]}"#);
    }

    #[test]
    fn test_add_and_remove_shape() {
        let mut doc = Document::new();
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        let id = rect.id();

        assert_eq!(doc.add_shape(Shape::Rectangle(rect)), 0);
        assert_eq!(doc.len(), 1);
        assert!(doc.get_shape(id).is_some());

        let (index, removed) = doc.remove_shape(id).unwrap();
        assert_eq!(index, 0);
        assert_eq!(removed.id(), id);
        assert!(doc.is_empty());
        assert!(doc.remove_shape(id).is_none());
    }

    #[test]
    fn test_insert_preserves_paint_order() {
        let mut doc = Document::new();
        let a = Shape::Rectangle(Rectangle::new(Point::ZERO, 1.0, 1.0));
        let b = Shape::Ellipse(Ellipse::new(Point::ZERO, 1.0, 1.0));
        let c = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0)));
        let ids = [a.id(), b.id(), c.id()];
        doc.add_shape(a);
        doc.add_shape(b);
        doc.add_shape(c);

        let (index, middle) = doc.remove_shape(ids[1]).unwrap();
        assert_eq!(doc.ids(), vec![ids[0], ids[2]]);
        doc.insert_shape(index, middle);
        assert_eq!(doc.ids(), ids.to_vec());
    }

    #[test]
    fn test_insert_index_clamped() {
        let mut doc = Document::new();
        let rect = Shape::Rectangle(Rectangle::new(Point::ZERO, 1.0, 1.0));
        assert_eq!(doc.insert_shape(7, rect), 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = Document::new();
        let mut rect = Rectangle::new(Point::new(1.5, 2.25), 10.0, 20.0);
        rect.style = ShapeStyle::new(
            Palette::new(Some(SerializableColor::new(1, 2, 3, 255)), SerializableColor::black()),
            4.5,
        );
        let mut line = Line::new(Point::new(-3.0, 0.1), Point::new(7.0, 9.0));
        line.style.stroke_color = SerializableColor::blue_violet();
        doc.add_shape(Shape::Rectangle(rect));
        doc.add_shape(Shape::Ellipse(Ellipse::new(Point::new(5.0, 5.0), 0.0, 3.0)));
        doc.add_shape(Shape::Line(line));

        let json = doc.to_json().unwrap();
        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded, doc);
    }
}
