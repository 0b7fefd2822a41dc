//! WebAssembly entry point and DOM wiring.
//!
//! Expects the page to provide an `<svg id="editor">` containing a
//! `<g id="elements">`, tool buttons (`#rectangle`, `#ellipse`, `#line`),
//! the `#color` and `#lineWidth` inputs, and `#undo`, `#exportSVG` and
//! `#restore` buttons.

use crate::app::{App, AppConfig};
use crate::dom::DomSurface;
use crate::ui::{Notice, TOOL_BUTTONS, UiAction};
use kurbo::Point;
use sketchpad_core::storage::{PlatformStorage, create_default_storage};
use sketchpad_core::{KeyEvent, MouseButton, PointerEvent};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget, HtmlInputElement, KeyboardEvent, MouseEvent};

type WebApp = App<PlatformStorage, DomSurface>;
type SharedApp = Rc<RefCell<WebApp>>;

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))
}

/// Attach a typed event listener for the lifetime of the page.
fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn dispatch(app: &SharedApp, id: &str, value: &str) {
    match UiAction::from_control(id, value) {
        Ok(action) => {
            let notice = app.borrow_mut().handle(action);
            show_notice(notice);
        }
        Err(e) => log::warn!("{}", e),
    }
}

fn show_notice(notice: Option<Notice>) {
    match notice {
        Some(Notice::Exported { file_name, svg }) => {
            if let Err(e) = download_file(&file_name, &svg, "image/svg+xml") {
                log::error!("Failed to download {}: {:?}", file_name, e);
            }
        }
        None => {}
        Some(notice) => {
            if let (Some(window), Some(message)) = (web_sys::window(), notice.message()) {
                let _ = window.alert_with_message(&message);
            }
        }
    }
}

fn download_file(filename: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(content));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(filename);
    a.click();

    web_sys::Url::revoke_object_url(&url).ok();
    log::info!("Downloaded {}", filename);
    Ok(())
}

fn wire_pointer(app: &SharedApp, document: &Document, root: &Element) -> Result<(), JsValue> {
    // Presses start on the canvas; moves and releases are tracked page-wide
    // so a gesture still ends when the pointer leaves the canvas.
    let targets: [(&'static str, &EventTarget); 3] = [
        ("mousedown", root.as_ref()),
        ("mousemove", document.as_ref()),
        ("mouseup", document.as_ref()),
    ];
    for (name, target) in targets {
        let app = app.clone();
        listen(target, name, move |event: MouseEvent| {
            let position = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            let button = MouseButton::from_dom(event.button());
            let pointer = match (name, button) {
                ("mousemove", _) => PointerEvent::Move { position },
                ("mousedown", Some(button)) => PointerEvent::Down { position, button },
                ("mouseup", Some(button)) => PointerEvent::Up { position, button },
                _ => return,
            };
            let notice = {
                let mut app = app.borrow_mut();
                let origin = app.editor().surface().origin();
                app.editor_mut().viewport_mut().set_origin(origin);
                app.handle_pointer(pointer)
            };
            show_notice(notice);
        })?;
    }

    listen(root, "contextmenu", |event: MouseEvent| event.prevent_default())
}

fn wire_keyboard(app: &SharedApp, document: &Document) -> Result<(), JsValue> {
    let app = app.clone();
    listen(document, "keydown", move |event: KeyboardEvent| {
        let typing = event
            .target()
            .is_some_and(|target| target.dyn_into::<HtmlInputElement>().is_ok());
        if typing {
            return;
        }
        let ctrl = event.ctrl_key() || event.meta_key();
        let notice = app
            .borrow_mut()
            .handle_key(&KeyEvent::Pressed(event.key()), ctrl);
        show_notice(notice);
    })
}

fn wire_toolbar(app: &SharedApp, document: &Document) -> Result<(), JsValue> {
    let buttons = TOOL_BUTTONS
        .iter()
        .map(|(id, _)| *id)
        .chain(["undo", "exportSVG", "restore"]);
    for id in buttons {
        let app = app.clone();
        listen(&element(document, id)?, "click", move |_: web_sys::Event| {
            dispatch(&app, id, "");
        })?;
    }

    for id in ["color", "lineWidth"] {
        let input = element(document, id)?.dyn_into::<HtmlInputElement>()?;
        let app = app.clone();
        let source = input.clone();
        listen(&input, "change", move |_: web_sys::Event| {
            dispatch(&app, id, &source.value());
        })?;
    }
    Ok(())
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let root = element(&document, "editor")?;
    let elements = element(&document, "elements")?;

    let mut config = AppConfig::default();
    let rect = root.get_bounding_client_rect();
    if rect.width() > 0.0 && rect.height() > 0.0 {
        config.editor.canvas_width = rect.width();
        config.editor.canvas_height = rect.height();
    }
    log::info!("Starting {} (WASM)", config.title);

    let storage = create_default_storage().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let surface = DomSurface::new(document.clone(), root.clone(), elements);
    let app: SharedApp = Rc::new(RefCell::new(App::new(config, storage, surface)));

    wire_pointer(&app, &document, &root)?;
    wire_keyboard(&app, &document)?;
    wire_toolbar(&app, &document)?;

    // New shapes start at the width the page shows
    let width = element(&document, "lineWidth")?.dyn_into::<HtmlInputElement>()?;
    dispatch(&app, "lineWidth", &width.value());
    Ok(())
}
