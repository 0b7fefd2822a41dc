//! Shape definitions for the drawing surface.

mod ellipse;
mod line;
mod rectangle;

pub use ellipse::Ellipse;
pub use line::Line;
pub use rectangle::Rectangle;

use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?}")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// The selection highlight used by default.
    pub const fn blue_violet() -> Self {
        Self::new(138, 43, 226, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, 255))
            }
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A fill/stroke color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    /// Stroke color.
    pub stroke: SerializableColor,
}

impl Palette {
    pub fn new(fill: Option<SerializableColor>, stroke: SerializableColor) -> Self {
        Self { fill, stroke }
    }

    /// Both fill and stroke set to the same color.
    pub fn solid(color: SerializableColor) -> Self {
        Self::new(Some(color), color)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(None, SerializableColor::black())
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Colors the shape returns to when its selection highlight is removed.
    /// Set at creation and at every style commit.
    pub baseline: Palette,
}

impl ShapeStyle {
    /// Create a style whose baseline matches its current colors.
    pub fn new(palette: Palette, stroke_width: f64) -> Self {
        Self {
            stroke_color: palette.stroke,
            stroke_width: stroke_width.max(0.0),
            fill_color: palette.fill,
            baseline: palette,
        }
    }

    /// Current fill/stroke pair.
    pub fn palette(&self) -> Palette {
        Palette::new(self.fill_color, self.stroke_color)
    }

    /// Overwrite the current fill/stroke pair (baseline untouched).
    pub fn apply_palette(&mut self, palette: Palette) {
        self.fill_color = palette.fill;
        self.stroke_color = palette.stroke;
    }

    /// Drop any transient coloring and return to the baseline.
    pub fn restore_baseline(&mut self) {
        self.apply_palette(self.baseline);
    }

    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(Palette::default(), 2.0)
    }
}

/// Unique identifier for shapes.
pub type ShapeId = uuid::Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// The point a drag grabs: top-left, center or first endpoint.
    fn reference_point(&self) -> Point;

    /// Rigidly move the shape so its reference point lands on `target`.
    fn move_reference_to(&mut self, target: Point);
}

/// Shape kind, also used as the drawing tool selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Line,
}

/// Exact copy of one shape's geometry, used to undo moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Rectangle {
        position: Point,
        width: f64,
        height: f64,
    },
    Ellipse {
        center: Point,
        radius_x: f64,
        radius_y: f64,
    },
    Line {
        start: Point,
        end: Point,
    },
}

/// Enum wrapper for all shape types (for serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Ellipse(s) => s.id(),
            Shape::Line(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
        }
    }

    /// Hit test against the painted area. Points outside the bounds grown by
    /// the tolerance and half the stroke are rejected without the exact test.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let band = tolerance + self.style().stroke_width / 2.0;
        let reach = self.bounds().inflate(band, band);
        if point.x < reach.x0 || point.x > reach.x1 || point.y < reach.y0 || point.y > reach.y1 {
            return false;
        }
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Ellipse(s) => s.hit_test(point, tolerance),
            Shape::Line(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Ellipse(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style(),
            Shape::Ellipse(s) => s.style(),
            Shape::Line(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
        }
    }

    pub fn reference_point(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.reference_point(),
            Shape::Ellipse(s) => s.reference_point(),
            Shape::Line(s) => s.reference_point(),
        }
    }

    pub fn move_reference_to(&mut self, target: Point) {
        match self {
            Shape::Rectangle(s) => s.move_reference_to(target),
            Shape::Ellipse(s) => s.move_reference_to(target),
            Shape::Line(s) => s.move_reference_to(target),
        }
    }

    /// Snapshot the geometry.
    pub fn geometry(&self) -> Geometry {
        match self {
            Shape::Rectangle(r) => Geometry::Rectangle {
                position: r.position,
                width: r.width,
                height: r.height,
            },
            Shape::Ellipse(e) => Geometry::Ellipse {
                center: e.center,
                radius_x: e.radius_x,
                radius_y: e.radius_y,
            },
            Shape::Line(l) => Geometry::Line {
                start: l.start,
                end: l.end,
            },
        }
    }

    /// Overwrite the geometry. Returns false (and changes nothing) if the
    /// geometry belongs to a different kind of shape.
    pub fn set_geometry(&mut self, geometry: Geometry) -> bool {
        match (self, geometry) {
            (
                Shape::Rectangle(r),
                Geometry::Rectangle {
                    position,
                    width,
                    height,
                },
            ) => {
                r.position = position;
                r.width = width;
                r.height = height;
                true
            }
            (
                Shape::Ellipse(e),
                Geometry::Ellipse {
                    center,
                    radius_x,
                    radius_y,
                },
            ) => {
                e.center = center;
                e.radius_x = radius_x;
                e.radius_y = radius_y;
                true
            }
            (Shape::Line(l), Geometry::Line { start, end }) => {
                l.start = start;
                l.end = end;
                true
            }
            _ => false,
        }
    }

    /// Check if this shape is a line.
    pub fn is_line(&self) -> bool {
        matches!(self, Shape::Line(_))
    }
}
