//! Editor configuration.

use crate::shapes::{Palette, SerializableColor, ShapeStyle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default storage key for the autosaved drawing.
pub const DEFAULT_STORAGE_KEY: &str = "savedDrawing";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Tunables for an editor session. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Color applied to fill and stroke of the selected shape.
    pub highlight_color: SerializableColor,
    /// Initial value of the stroke width control.
    pub default_stroke_width: f64,
    /// Stroke color of new shapes.
    pub default_stroke_color: SerializableColor,
    /// Fill color of new shapes (None = no fill).
    pub default_fill_color: Option<SerializableColor>,
    /// Canvas width, used as the export size.
    pub canvas_width: f64,
    /// Canvas height, used as the export size.
    pub canvas_height: f64,
    /// Key the autosaved drawing is stored under.
    pub storage_key: String,
    /// Cap on the undo log; None keeps every record.
    pub max_undo_depth: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            highlight_color: SerializableColor::blue_violet(),
            default_stroke_width: 2.0,
            default_stroke_color: SerializableColor::black(),
            default_fill_color: None,
            canvas_width: 800.0,
            canvas_height: 600.0,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_undo_depth: None,
        }
    }
}

impl EditorConfig {
    /// Style given to newly drawn shapes.
    pub fn default_style(&self) -> ShapeStyle {
        ShapeStyle::new(
            Palette::new(self.default_fill_color, self.default_stroke_color),
            self.default_stroke_width,
        )
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a configuration file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Default configuration file location.
    ///
    /// On Unix: `~/.config/sketchpad/config.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|base| base.join("sketchpad").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = EditorConfig::from_json(r#"{ "default_stroke_width": 5.0 }"#).unwrap();
        assert_eq!(config.default_stroke_width, 5.0);
        assert_eq!(config.highlight_color, SerializableColor::blue_violet());
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.max_undo_depth, None);
    }

    #[test]
    fn test_invalid_json() {
        let result = EditorConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_default_style() {
        let style = EditorConfig::default().default_style();
        assert_eq!(style.stroke_width, 2.0);
        assert_eq!(style.fill_color, None);
        assert_eq!(style.baseline, style.palette());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "storage_key": "other", "max_undo_depth": 10 }"#).unwrap();
        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.storage_key, "other");
        assert_eq!(config.max_undo_depth, Some(10));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EditorConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
