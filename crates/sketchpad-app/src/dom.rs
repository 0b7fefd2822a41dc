//! SVG DOM rendering surface for the browser.
//!
//! Each shape is an SVG element under the `#elements` group, tagged with a
//! `data-id` attribute so picking can map the element back to its shape.

use kurbo::Point;
use sketchpad_core::export::{self, SVG_NS};
use sketchpad_core::{RenderSurface, Shape, ShapeId, ShapeKind};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Node};

const ID_ATTRIBUTE: &str = "data-id";

/// Retained surface backed by live SVG elements.
pub struct DomSurface {
    document: Document,
    /// The `<svg>` root; its client rect anchors canvas coordinates.
    root: Element,
    /// Container for persisted shapes, in paint order.
    elements: Element,
    preview: Option<(ShapeKind, Element)>,
}

impl DomSurface {
    pub fn new(document: Document, root: Element, elements: Element) -> Self {
        Self {
            document,
            root,
            elements,
            preview: None,
        }
    }

    /// Canvas origin in client coordinates.
    pub fn origin(&self) -> kurbo::Vec2 {
        let rect = self.root.get_bounding_client_rect();
        kurbo::Vec2::new(rect.left(), rect.top())
    }

    fn create(&self, shape: &Shape) -> Result<Element, JsValue> {
        let element = self
            .document
            .create_element_ns(Some(SVG_NS), export::element_name(shape.kind()))?;
        apply(&element, shape)?;
        Ok(element)
    }

    fn find(&self, id: ShapeId) -> Option<Element> {
        let selector = format!("[{}=\"{}\"]", ID_ATTRIBUTE, id);
        self.elements.query_selector(&selector).ok().flatten()
    }
}

fn apply(element: &Element, shape: &Shape) -> Result<(), JsValue> {
    element.set_attribute(ID_ATTRIBUTE, &shape.id().to_string())?;
    for (name, value) in export::attributes(shape) {
        element.set_attribute(name, &value)?;
    }
    Ok(())
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::error!("SVG surface error: {:?}", e);
    }
}

impl RenderSurface for DomSurface {
    fn insert(&mut self, index: usize, shape: &Shape) {
        report(self.create(shape).and_then(|element| {
            let before: Option<Node> = self.elements.children().item(index as u32).map(Into::into);
            self.elements
                .insert_before(&element, before.as_ref())
                .map(|_| ())
        }));
    }

    fn update(&mut self, shape: &Shape) {
        if let Some(element) = self.find(shape.id()) {
            report(apply(&element, shape));
        }
    }

    fn remove(&mut self, id: ShapeId) {
        if let Some(element) = self.find(id) {
            element.remove();
        }
    }

    fn clear(&mut self) {
        self.elements.set_inner_html("");
    }

    fn hit_test(&self, point: Point) -> Option<ShapeId> {
        let client = point + self.origin();
        let mut element = self
            .document
            .element_from_point(client.x as f32, client.y as f32);
        // Walk up in case a child of a shape element was hit
        while let Some(current) = element {
            if let Some(id) = current.get_attribute(ID_ATTRIBUTE) {
                return ShapeId::parse_str(&id).ok();
            }
            if current == self.root {
                return None;
            }
            element = current.parent_element();
        }
        None
    }

    fn show_preview(&mut self, shape: &Shape) {
        if let Some((kind, element)) = &self.preview {
            if *kind == shape.kind() {
                report(
                    export::attributes(shape)
                        .into_iter()
                        .try_for_each(|(name, value)| element.set_attribute(name, &value)),
                );
                return;
            }
            element.remove();
        }
        let created = self
            .document
            .create_element_ns(Some(SVG_NS), export::element_name(shape.kind()))
            .and_then(|element| {
                for (name, value) in export::attributes(shape) {
                    element.set_attribute(name, &value)?;
                }
                // The preview must never be picked
                element.set_attribute("pointer-events", "none")?;
                element.set_attribute("stroke-dasharray", "4 2")?;
                self.root.append_child(&element)?;
                Ok(element)
            });
        match created {
            Ok(element) => self.preview = Some((shape.kind(), element)),
            Err(e) => {
                self.preview = None;
                log::error!("SVG surface error: {:?}", e);
            }
        }
    }

    fn hide_preview(&mut self) {
        if let Some((_, element)) = self.preview.take() {
            element.remove();
        }
    }
}
