//! Toolbar commands and user-facing notices.

use sketchpad_core::{ColorParseError, SerializableColor, ToolKind};
use thiserror::Error;

/// Toolbar buttons that pick a drawing tool, by element id.
pub const TOOL_BUTTONS: [(&str, ToolKind); 3] = [
    ("rectangle", ToolKind::Rectangle),
    ("ellipse", ToolKind::Ellipse),
    ("line", ToolKind::Line),
];

/// Actions that can be triggered from the toolbar or shortcuts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Change the tool used by the next drawing gesture.
    SelectTool(ToolKind),
    /// Recolor the selected shape.
    SetFill(SerializableColor),
    /// Change the width control (and the selected shape's width).
    SetStrokeWidth(f64),
    Undo,
    /// Export the drawing as an SVG download.
    Export,
    /// Replace the drawing with the autosaved one.
    Restore,
    DeleteSelected,
}

/// Errors turning a control's value into an action.
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Invalid color: {0}")]
    Color(#[from] ColorParseError),
    #[error("Invalid stroke width: {0:?}")]
    StrokeWidth(String),
    #[error("Unknown control: {0}")]
    UnknownControl(String),
}

impl UiAction {
    /// Map a toolbar control, identified by element id, and its current
    /// value to an action. Buttons ignore `value`.
    pub fn from_control(id: &str, value: &str) -> Result<Self, UiError> {
        if let Some((_, tool)) = TOOL_BUTTONS.iter().find(|(button, _)| *button == id) {
            return Ok(UiAction::SelectTool(*tool));
        }
        match id {
            "color" => Ok(UiAction::SetFill(SerializableColor::from_hex(value)?)),
            "lineWidth" => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite())
                .map(UiAction::SetStrokeWidth)
                .ok_or_else(|| UiError::StrokeWidth(value.to_string())),
            "undo" => Ok(UiAction::Undo),
            "exportSVG" => Ok(UiAction::Export),
            "restore" => Ok(UiAction::Restore),
            _ => Err(UiError::UnknownControl(id.to_string())),
        }
    }
}

/// Outcome of an action that the shell should surface to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Restored,
    NothingToRestore,
    /// Persistence failed; the drawing itself is intact.
    StorageUnavailable(String),
    /// An SVG export is ready to be offered as a download.
    Exported { file_name: String, svg: String },
}

impl Notice {
    /// Text to show the user, if this notice warrants a message.
    pub fn message(&self) -> Option<String> {
        match self {
            Notice::Restored => Some("Drawing restored successfully!".to_string()),
            Notice::NothingToRestore => Some("No saved drawing found.".to_string()),
            Notice::StorageUnavailable(reason) => {
                Some(format!("Drawing storage unavailable: {}", reason))
            }
            Notice::Exported { .. } => None,
        }
    }
}
