//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use sketchpad_core::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }

    /// Check if a DOM `KeyboardEvent.key` value triggers this shortcut.
    pub fn matches(&self, key: &str, ctrl: bool) -> bool {
        self.ctrl == ctrl && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Delete", false, "Delete selected shape", UiAction::DeleteSelected),
            Shortcut::new("Z", true, "Undo", UiAction::Undo),
            Shortcut::new("E", true, "Export to SVG", UiAction::Export),
            Shortcut::new(
                "R",
                false,
                "Rectangle tool",
                UiAction::SelectTool(ToolKind::Rectangle),
            ),
            Shortcut::new("E", false, "Ellipse tool", UiAction::SelectTool(ToolKind::Ellipse)),
            Shortcut::new("L", false, "Line tool", UiAction::SelectTool(ToolKind::Line)),
        ]
    }

    /// Find the action bound to a key press.
    pub fn lookup(key: &str, ctrl: bool) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|s| s.matches(key, ctrl))
            .map(|s| s.action)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.format(), shortcut.description);
        }
        println!("  {:20} {}", "Right-click", "Select shape");
        println!("  {:20} {}", "Right-drag", "Move selected shape");
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("Delete", false), Some(UiAction::DeleteSelected));
        assert_eq!(ShortcutRegistry::lookup("z", true), Some(UiAction::Undo));
        assert_eq!(ShortcutRegistry::lookup("z", false), None);
        assert_eq!(
            ShortcutRegistry::lookup("e", false),
            Some(UiAction::SelectTool(ToolKind::Ellipse))
        );
        assert_eq!(ShortcutRegistry::lookup("Delete", true), None);
    }

    #[test]
    fn test_format() {
        let shortcuts = ShortcutRegistry::all();
        assert_eq!(shortcuts[0].format(), "Delete");
        assert_eq!(shortcuts[1].format(), "Ctrl+Z");
    }
}
