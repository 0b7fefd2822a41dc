//! Application state: binds the editor, autosave and the toolbar commands.

use crate::shortcuts::ShortcutRegistry;
use crate::ui::{Notice, UiAction};
use sketchpad_core::export;
use sketchpad_core::storage::{AutoSaver, Storage, StorageError};
use sketchpad_core::{ConfigError, Editor, EditorConfig, KeyEvent, PointerEvent, RenderSurface};
use std::sync::Arc;
use thiserror::Error;

/// File name offered for SVG downloads.
pub const EXPORT_FILE_NAME: &str = "svg_editor.svg";

/// Errors that stop the application from starting.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub export_file_name: String,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Sketchpad".to_string(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            editor: EditorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn with_editor(editor: EditorConfig) -> Self {
        Self {
            editor,
            ..Self::default()
        }
    }
}

/// The running application. Generic over the persistence backend and the
/// rendering surface so the same wiring runs in the browser and in tests.
pub struct App<S: Storage, R: RenderSurface> {
    config: AppConfig,
    editor: Editor<R>,
    autosaver: AutoSaver<S>,
}

impl<S: Storage, R: RenderSurface> App<S, R> {
    pub fn new(config: AppConfig, storage: Arc<S>, surface: R) -> Self {
        let editor = Editor::with_surface(&config.editor, surface);
        let mut autosaver = AutoSaver::from_config(storage, &config.editor);
        // An empty canvas must not overwrite a previous session's drawing
        autosaver.mark_saved(editor.revision());
        log::info!("{} ready", config.title);
        Self {
            config,
            editor,
            autosaver,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn editor(&self) -> &Editor<R> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor<R> {
        &mut self.editor
    }

    /// Run a toolbar or shortcut action.
    pub fn handle(&mut self, action: UiAction) -> Option<Notice> {
        log::debug!("action: {:?}", action);
        match action {
            UiAction::SelectTool(tool) => {
                self.editor.select_tool(tool);
                None
            }
            UiAction::SetFill(color) => {
                self.editor.set_fill(color);
                self.persist()
            }
            UiAction::SetStrokeWidth(width) => {
                self.editor.set_stroke_width(width);
                self.persist()
            }
            UiAction::Undo => {
                self.editor.undo();
                self.persist()
            }
            UiAction::DeleteSelected => {
                self.editor.delete_selected();
                self.persist()
            }
            UiAction::Export => Some(Notice::Exported {
                file_name: self.config.export_file_name.clone(),
                svg: self.export_svg(),
            }),
            UiAction::Restore => Some(self.restore()),
        }
    }

    /// Forward a pointer event. The drawing is saved once a gesture ends,
    /// not on every move.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<Notice> {
        self.editor.handle_pointer(event);
        match event {
            PointerEvent::Move { .. } => None,
            _ => self.persist(),
        }
    }

    /// Forward a key press through the shortcut table.
    pub fn handle_key(&mut self, event: &KeyEvent, ctrl: bool) -> Option<Notice> {
        let KeyEvent::Pressed(key) = event else {
            return None;
        };
        let action = ShortcutRegistry::lookup(key, ctrl)?;
        self.handle(action)
    }

    /// SVG markup of the drawing without the selection highlight.
    pub fn export_svg(&self) -> String {
        export::to_svg(
            &self.editor.snapshot(),
            self.config.editor.canvas_width,
            self.config.editor.canvas_height,
        )
    }

    /// Replace the drawing with the autosaved one.
    pub fn restore(&mut self) -> Notice {
        match self.autosaver.restore() {
            Ok(Some(document)) => {
                self.editor.restore(document);
                self.autosaver.mark_saved(self.editor.revision());
                Notice::Restored
            }
            Ok(None) => {
                log::info!("nothing to restore under {:?}", self.autosaver.key());
                Notice::NothingToRestore
            }
            Err(e) => {
                log::warn!("Failed to restore drawing: {}", e);
                Notice::StorageUnavailable(e.to_string())
            }
        }
    }

    /// Save the snapshot if the editor changed since the last save.
    fn persist(&mut self) -> Option<Notice> {
        let revision = self.editor.revision();
        match self.autosaver.save_if_changed(revision, &self.editor.snapshot()) {
            Ok(_) => None,
            Err(e) => {
                log::warn!("Failed to save drawing: {}", e);
                Some(Notice::StorageUnavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sketchpad_core::storage::{MemoryStorage, StorageResult};
    use sketchpad_core::{Document, MouseButton, SceneSurface, SerializableColor, ToolKind};

    /// Backend whose writes always fail.
    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn save(&self, _key: &str, _document: &Document) -> StorageResult<()> {
            Err(StorageError::Io("read-only".to_string()))
        }
        fn load(&self, key: &str) -> StorageResult<Document> {
            Err(StorageError::NotFound(key.to_string()))
        }
        fn delete(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
        fn exists(&self, _key: &str) -> StorageResult<bool> {
            Ok(false)
        }
    }

    type TestApp = App<MemoryStorage, SceneSurface>;

    fn app(storage: &Arc<MemoryStorage>) -> TestApp {
        App::new(AppConfig::default(), storage.clone(), SceneSurface::new())
    }

    fn press(button: MouseButton, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button,
        }
    }

    fn release(button: MouseButton, x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button,
        }
    }

    fn draw<S: Storage, R: RenderSurface>(
        app: &mut App<S, R>,
        from: (f64, f64),
        to: (f64, f64),
    ) -> Option<Notice> {
        app.handle_pointer(press(MouseButton::Left, from.0, from.1));
        app.handle_pointer(PointerEvent::Move {
            position: Point::new(to.0, to.1),
        });
        app.handle_pointer(release(MouseButton::Left, to.0, to.1))
    }

    fn saved(storage: &MemoryStorage) -> Option<Document> {
        storage.load(sketchpad_core::config::DEFAULT_STORAGE_KEY).ok()
    }

    #[test]
    fn test_commit_autosaves() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        assert!(saved(&storage).is_none());

        assert!(draw(&mut app, (10.0, 10.0), (50.0, 40.0)).is_none());
        assert_eq!(saved(&storage).unwrap(), app.editor().snapshot());
    }

    #[test]
    fn test_highlight_is_not_persisted() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        app.handle(UiAction::SelectTool(ToolKind::Line));
        draw(&mut app, (0.0, 0.0), (100.0, 0.0));

        app.handle_pointer(press(MouseButton::Right, 50.0, 0.0));
        app.handle_pointer(release(MouseButton::Right, 50.0, 0.0));
        assert!(app.editor().selection().is_some());

        let doc = saved(&storage).unwrap();
        let style = doc.shapes()[0].style();
        assert_eq!(style.stroke_color, SerializableColor::black());
    }

    #[test]
    fn test_restore_nothing_saved() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        assert_eq!(app.handle(UiAction::Restore), Some(Notice::NothingToRestore));
    }

    #[test]
    fn test_restore_from_previous_session() {
        let storage = Arc::new(MemoryStorage::new());
        let mut first = app(&storage);
        draw(&mut first, (10.0, 10.0), (50.0, 40.0));
        first.handle(UiAction::SelectTool(ToolKind::Ellipse));
        draw(&mut first, (100.0, 100.0), (140.0, 120.0));
        let expected = first.editor().snapshot();

        let mut second = app(&storage);
        assert!(second.editor().document().is_empty());
        assert_eq!(second.handle(UiAction::Restore), Some(Notice::Restored));
        assert_eq!(second.editor().document(), &expected);
        assert!(!second.editor().can_undo());
    }

    #[test]
    fn test_restore_after_undoing_everything() {
        let storage = Arc::new(MemoryStorage::new());
        let mut first = app(&storage);
        draw(&mut first, (10.0, 10.0), (50.0, 40.0));
        first.handle(UiAction::Undo);
        assert!(saved(&storage).unwrap().is_empty());

        let mut second = app(&storage);
        assert_eq!(second.handle(UiAction::Restore), Some(Notice::NothingToRestore));
        assert!(second.editor().document().is_empty());
    }

    #[test]
    fn test_right_click_records_selection_then_move() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        draw(&mut app, (10.0, 10.0), (50.0, 40.0));
        draw(&mut app, (100.0, 100.0), (140.0, 120.0));
        let (a, b) = {
            let ids = app.editor().document().ids();
            (ids[0], ids[1])
        };
        let before = app.editor().history().len();

        app.handle_pointer(press(MouseButton::Right, 10.0, 20.0));
        app.handle_pointer(release(MouseButton::Right, 10.0, 20.0));
        assert_eq!(app.editor().history().len(), before + 2);
        app.handle_pointer(press(MouseButton::Right, 100.0, 110.0));
        app.handle_pointer(release(MouseButton::Right, 100.0, 110.0));
        assert_eq!(app.editor().history().len(), before + 4);
        assert_eq!(app.editor().selection(), Some(b));

        // The first undo only reverts the zero-distance move of B
        assert_eq!(app.editor().history().last().map(|r| r.name()), Some("move"));
        app.handle(UiAction::Undo);
        assert_eq!(app.editor().selection(), Some(b));
        assert_eq!(app.editor().history().last().map(|r| r.name()), Some("style change"));

        // The next one drops B's highlight; A's highlight was already removed
        app.handle(UiAction::Undo);
        let snapshot = app.editor().snapshot();
        assert_eq!(app.editor().document(), &snapshot);
        assert!(app.editor().document().contains(a));
    }

    #[test]
    fn test_undo_and_delete_are_saved() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        draw(&mut app, (10.0, 10.0), (50.0, 40.0));
        draw(&mut app, (100.0, 100.0), (140.0, 120.0));

        app.handle(UiAction::Undo);
        assert_eq!(saved(&storage).unwrap().len(), 1);

        app.handle_pointer(press(MouseButton::Right, 10.0, 20.0));
        app.handle_pointer(release(MouseButton::Right, 10.0, 20.0));
        app.handle_key(&KeyEvent::Pressed("Delete".to_string()), false);
        assert!(saved(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_style_commands() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        draw(&mut app, (10.0, 10.0), (50.0, 40.0));
        app.handle_pointer(press(MouseButton::Right, 10.0, 20.0));
        app.handle_pointer(release(MouseButton::Right, 10.0, 20.0));

        let red = SerializableColor::new(255, 0, 0, 255);
        app.handle(UiAction::SetFill(red));
        app.handle(UiAction::SetStrokeWidth(5.0));

        let style = saved(&storage).unwrap().shapes()[0].style().clone();
        assert_eq!(style.fill_color, Some(red));
        assert_eq!(style.stroke_width, 5.0);
    }

    #[test]
    fn test_export() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        draw(&mut app, (10.0, 10.0), (50.0, 40.0));
        // Preview of an unfinished gesture is not exported
        app.handle_pointer(press(MouseButton::Left, 200.0, 200.0));

        match app.handle(UiAction::Export) {
            Some(Notice::Exported { file_name, svg }) => {
                assert_eq!(file_name, EXPORT_FILE_NAME);
                assert_eq!(svg.matches("<rect").count(), 1);
                assert!(svg.contains("width=\"800\" height=\"600\""));
            }
            other => panic!("unexpected notice: {:?}", other),
        }
    }

    #[test]
    fn test_storage_failure_keeps_editor_consistent() {
        let mut app = App::new(
            AppConfig::default(),
            Arc::new(ReadOnlyStorage),
            SceneSurface::new(),
        );
        let notice = draw(&mut app, (10.0, 10.0), (50.0, 40.0));
        assert!(matches!(notice, Some(Notice::StorageUnavailable(_))));
        assert_eq!(app.editor().document().len(), 1);
        assert!(app.editor().can_undo());
    }

    #[test]
    fn test_shortcut_undo() {
        let storage = Arc::new(MemoryStorage::new());
        let mut app = app(&storage);
        draw(&mut app, (10.0, 10.0), (50.0, 40.0));
        app.handle_key(&KeyEvent::Pressed("z".to_string()), true);
        assert!(app.editor().document().is_empty());
        assert!(app.handle_key(&KeyEvent::Released("z".to_string()), true).is_none());
    }
}
