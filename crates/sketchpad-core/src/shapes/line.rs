//! Line shape.

use super::{ShapeId, ShapeStyle, ShapeTrait, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment. Direction matters: `start` is the drag anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end)
            <= tolerance + self.style.stroke_width / 2.0
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        path
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn reference_point(&self) -> Point {
        self.start
    }

    fn move_reference_to(&mut self, target: Point) {
        let span = self.end - self.start;
        self.start = target;
        self.end = target + span;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_creation() {
        let line = Line::new(Point::new(100.0, 0.0), Point::new(0.0, 0.0));
        assert_eq!(line.start, Point::new(100.0, 0.0));
        assert_eq!(line.end, Point::ZERO);
        assert_eq!(line.style, ShapeStyle::default());
    }

    #[test]
    fn test_hit_test_on_line() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 0.0), 1.0));
        assert!(line.hit_test(Point::new(50.0, 2.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 20.0), 5.0));
    }

    #[test]
    fn test_hit_test_endpoints() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(0.0, 0.0), 1.0));
        assert!(line.hit_test(Point::new(100.0, 0.0), 1.0));
    }

    #[test]
    fn test_bounds_any_direction() {
        let line = Line::new(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
        let bounds = line.bounds();
        assert_eq!(bounds, Rect::new(10.0, 20.0, 50.0, 80.0));
    }

    #[test]
    fn test_move_preserves_length_and_orientation() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0));
        line.move_reference_to(Point::new(3.0, -2.0));
        assert_eq!(line.start, Point::new(3.0, -2.0));
        assert_eq!(line.end, Point::new(8.0, 3.0));
    }
}
