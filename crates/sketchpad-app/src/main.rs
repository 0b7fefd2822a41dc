//! Main application entry point (native).
//!
//! Prints the autosaved drawing as SVG on stdout.

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    if std::env::args().any(|arg| arg == "--shortcuts") {
        sketchpad_app::ShortcutRegistry::print_all();
        return;
    }

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "native")]
fn run() -> Result<(), sketchpad_app::AppError> {
    use sketchpad_app::{App, AppConfig, Notice, UiAction};
    use sketchpad_core::storage::create_default_storage;
    use sketchpad_core::{EditorConfig, SceneSurface};

    let editor_config = match EditorConfig::default_path() {
        Some(path) if path.exists() => {
            log::info!("Loading config from {}", path.display());
            EditorConfig::load(&path)?
        }
        _ => EditorConfig::default(),
    };

    let storage = create_default_storage()?;
    let mut app = App::new(AppConfig::with_editor(editor_config), storage, SceneSurface::new());

    match app.handle(UiAction::Restore) {
        Some(Notice::Restored) => {
            if let Some(Notice::Exported { svg, .. }) = app.handle(UiAction::Export) {
                print!("{}", svg);
            }
        }
        other => {
            if let Some(message) = other.as_ref().and_then(Notice::message) {
                eprintln!("{}", message);
            }
        }
    }
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
