//! SVG export.
//!
//! Shapes map one-to-one onto `<rect>`, `<ellipse>` and `<line>` elements.
//! The same attribute mapping drives the browser's SVG surface.

use crate::document::Document;
use crate::shapes::{Geometry, SerializableColor, Shape, ShapeKind};
use std::fmt::Write;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// SVG element name for a shape kind.
pub fn element_name(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Rectangle => "rect",
        ShapeKind::Ellipse => "ellipse",
        ShapeKind::Line => "line",
    }
}

fn push_paint(
    attrs: &mut Vec<(&'static str, String)>,
    name: &'static str,
    opacity: &'static str,
    color: Option<SerializableColor>,
) {
    match color {
        Some(c) => {
            let opaque = SerializableColor { a: 255, ..c };
            attrs.push((name, opaque.to_hex()));
            if c.a != 255 {
                attrs.push((opacity, format!("{}", f64::from(c.a) / 255.0)));
            }
        }
        None => attrs.push((name, "none".to_string())),
    }
}

/// Geometry and paint attributes for a shape, in a stable order.
pub fn attributes(shape: &Shape) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::with_capacity(8);
    match shape.geometry() {
        Geometry::Rectangle {
            position,
            width,
            height,
        } => {
            attrs.push(("x", position.x.to_string()));
            attrs.push(("y", position.y.to_string()));
            attrs.push(("width", width.to_string()));
            attrs.push(("height", height.to_string()));
        }
        Geometry::Ellipse {
            center,
            radius_x,
            radius_y,
        } => {
            attrs.push(("cx", center.x.to_string()));
            attrs.push(("cy", center.y.to_string()));
            attrs.push(("rx", radius_x.to_string()));
            attrs.push(("ry", radius_y.to_string()));
        }
        Geometry::Line { start, end } => {
            attrs.push(("x1", start.x.to_string()));
            attrs.push(("y1", start.y.to_string()));
            attrs.push(("x2", end.x.to_string()));
            attrs.push(("y2", end.y.to_string()));
        }
    }
    let style = shape.style();
    push_paint(&mut attrs, "fill", "fill-opacity", style.fill_color);
    push_paint(&mut attrs, "stroke", "stroke-opacity", Some(style.stroke_color));
    attrs.push(("stroke-width", style.stroke_width.to_string()));
    attrs
}

/// Render one shape as an SVG element.
pub fn shape_to_svg(shape: &Shape) -> String {
    let mut out = format!("<{}", element_name(shape.kind()));
    for (name, value) in attributes(shape) {
        let _ = write!(out, " {}=\"{}\"", name, value);
    }
    out.push_str("/>");
    out
}

/// Render a document as a standalone SVG file, shapes in paint order.
///
/// Pass the editor's snapshot so the selection highlight is left out.
pub fn to_svg(document: &Document, width: f64, height: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        SVG_NS, width, height, width, height
    );
    for shape in document.shapes() {
        let _ = writeln!(out, "  {}", shape_to_svg(shape));
    }
    out.push_str("</svg>\n");
    log::info!("exported {} shapes to SVG", document.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Line, Palette, Rectangle, ShapeStyle};
    use kurbo::Point;

    #[test]
    fn test_rectangle_element() {
        let mut rect = Rectangle::new(Point::new(10.0, 20.0), 30.0, 40.0);
        rect.style = ShapeStyle::new(
            Palette::new(Some(SerializableColor::white()), SerializableColor::black()),
            2.0,
        );
        assert_eq!(
            shape_to_svg(&Shape::Rectangle(rect)),
            r##"<rect x="10" y="20" width="30" height="40" fill="#ffffff" stroke="#000000" stroke-width="2"/>"##
        );
    }

    #[test]
    fn test_no_fill_and_translucent_stroke() {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(5.5, 5.0));
        line.style.stroke_color = SerializableColor::new(255, 0, 0, 51);
        let svg = shape_to_svg(&Shape::Line(line));
        assert!(svg.starts_with("<line x1=\"0\" y1=\"0\" x2=\"5.5\" y2=\"5\""));
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains("stroke=\"#ff0000\" stroke-opacity=\"0.2\""));
    }

    #[test]
    fn test_document_in_paint_order() {
        let mut doc = Document::new();
        doc.add_shape(Shape::Ellipse(Ellipse::new(Point::new(5.0, 5.0), 2.0, 3.0)));
        doc.add_shape(Shape::Rectangle(Rectangle::new(Point::ZERO, 1.0, 1.0)));
        doc.add_shape(Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0))));

        let svg = to_svg(&doc, 800.0, 600.0);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"800\" height=\"600\""));
        let ellipse = svg.find("<ellipse").unwrap();
        let rect = svg.find("<rect").unwrap();
        let line = svg.find("<line").unwrap();
        assert!(ellipse < rect && rect < line);
        assert_eq!(svg.matches("/>").count(), 3);
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_empty_document() {
        let svg = to_svg(&Document::new(), 10.0, 10.0);
        assert_eq!(svg.lines().count(), 2);
    }
}
