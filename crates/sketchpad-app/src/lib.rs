//! Sketchpad Application
//!
//! The application shell: toolbar commands, shortcuts, autosave wiring,
//! and the browser entry point.

mod app;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig, AppError, EXPORT_FILE_NAME};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{Notice, TOOL_BUTTONS, UiAction, UiError};

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
