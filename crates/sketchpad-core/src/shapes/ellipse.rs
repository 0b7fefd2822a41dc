//! Ellipse shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            style: ShapeStyle::default(),
        }
    }

    /// Create an ellipse inscribed in the box spanned by two points:
    /// center at the midpoint, radii half the absolute deltas.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self::new(
            Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0),
            (p1.x - p2.x).abs() / 2.0,
            (p1.y - p2.y).abs() / 2.0,
        )
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, (self.radius_x, self.radius_y), 0.0)
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let half_sw = self.style.stroke_width / 2.0;
        let dx_outer = (point.x - self.center.x) / (self.radius_x + tolerance + half_sw);
        let dy_outer = (point.y - self.center.y) / (self.radius_y + tolerance + half_sw);
        if !dx_outer.is_finite() || !dy_outer.is_finite() {
            // Degenerate zero-size ellipse with no tolerance
            return point == self.center;
        }
        if dx_outer * dx_outer + dy_outer * dy_outer > 1.0 {
            return false;
        }
        if self.style.fill_color.is_some() {
            return true;
        }
        // Outline only: reject if inside inner ellipse
        let inner_rx = (self.radius_x - tolerance - half_sw).max(0.0);
        let inner_ry = (self.radius_y - tolerance - half_sw).max(0.0);
        if inner_rx < f64::EPSILON || inner_ry < f64::EPSILON {
            return true;
        }
        let dx_inner = (point.x - self.center.x) / inner_rx;
        let dy_inner = (point.y - self.center.y) / inner_ry;
        dx_inner * dx_inner + dy_inner * dy_inner > 1.0
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn reference_point(&self) -> Point {
        self.center
    }

    fn move_reference_to(&mut self, target: Point) {
        self.center = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::SerializableColor;

    #[test]
    fn test_ellipse_from_corners() {
        let ellipse = Ellipse::from_corners(Point::new(40.0, 10.0), Point::new(0.0, 30.0));
        assert_eq!(ellipse.center, Point::new(20.0, 20.0));
        assert_eq!(ellipse.radius_x, 20.0);
        assert_eq!(ellipse.radius_y, 10.0);
    }

    #[test]
    fn test_hit_test_center_filled() {
        let mut ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        ellipse.style.fill_color = Some(SerializableColor::black());
        assert!(ellipse.hit_test(Point::new(50.0, 50.0), 0.0));
    }

    #[test]
    fn test_hit_test_outline_only() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 10.0, 10.0);
        assert!(ellipse.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!ellipse.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(!ellipse.hit_test(Point::new(15.0, 0.0), 0.0));
    }

    #[test]
    fn test_zero_size_ellipse_hit_test() {
        let mut ellipse = Ellipse::new(Point::new(3.0, 3.0), 0.0, 0.0);
        ellipse.style.stroke_width = 0.0;
        assert!(!ellipse.hit_test(Point::new(4.0, 3.0), 0.0));
        assert!(ellipse.hit_test(Point::new(3.5, 3.0), 1.0));
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }
}
