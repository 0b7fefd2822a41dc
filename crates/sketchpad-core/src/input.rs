//! Pointer and keyboard events fed to the editor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button: draws shapes.
    Left,
    /// Secondary button: selects and drags shapes.
    Right,
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` value.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// Pointer event, position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Keyboard event type, carrying the DOM `KeyboardEvent.key` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    /// Check if this is a press of the Delete key.
    pub fn is_delete_press(&self) -> bool {
        matches!(self, KeyEvent::Pressed(key) if key == "Delete")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_button_mapping() {
        assert_eq!(MouseButton::from_dom(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_dom(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_dom(4), None);
    }

    #[test]
    fn test_delete_press() {
        assert!(KeyEvent::Pressed("Delete".to_string()).is_delete_press());
        assert!(!KeyEvent::Released("Delete".to_string()).is_delete_press());
        assert!(!KeyEvent::Pressed("Backspace".to_string()).is_delete_press());
    }
}
