//! Rectangle shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle from two corner points, in any drag direction.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        let width = p1.x.max(p2.x) - min_x;
        let height = p1.y.max(p2.y) - min_y;

        Self::new(Point::new(min_x, min_y), width, height)
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        if self.style.fill_color.is_some() {
            // Filled: hit anywhere inside
            rect.inflate(tolerance, tolerance).contains(point)
        } else {
            // Outline only: hit on the border
            let band = tolerance + self.style.stroke_width / 2.0;
            let outer = rect.inflate(band, band);
            let inner = rect.inflate(-band, -band);
            outer.contains(point) && !inner.contains(point)
        }
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn reference_point(&self) -> Point {
        self.position
    }

    fn move_reference_to(&mut self, target: Point) {
        self.position = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_from_corners_any_direction() {
        let rect = Rectangle::from_corners(Point::new(50.0, 50.0), Point::new(10.0, 10.0));
        assert_eq!(rect.position, Point::new(10.0, 10.0));
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 40.0);

        let rect = Rectangle::from_corners(Point::new(10.0, 50.0), Point::new(50.0, 10.0));
        assert_eq!(rect.position, Point::new(10.0, 10.0));
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn test_hit_test_outline() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(rect.hit_test(Point::new(0.0, 50.0), 1.0));
        assert!(!rect.hit_test(Point::new(50.0, 50.0), 1.0));
        assert!(!rect.hit_test(Point::new(150.0, 50.0), 1.0));
    }

    #[test]
    fn test_hit_test_filled() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        rect.style.fill_color = Some(super::super::SerializableColor::white());
        assert!(rect.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(rect.hit_test(Point::new(105.0, 50.0), 10.0)); // Within tolerance
    }

    #[test]
    fn test_move_reference_keeps_size() {
        let mut rect = Rectangle::new(Point::new(10.0, 20.0), 30.0, 40.0);
        rect.move_reference_to(Point::new(-5.0, 7.0));
        assert_eq!(rect.position, Point::new(-5.0, 7.0));
        assert_eq!((rect.width, rect.height), (30.0, 40.0));
    }
}
