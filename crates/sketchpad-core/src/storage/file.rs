//! File-based storage implementation for native platforms.

use super::{Storage, StorageError, StorageResult};
use crate::document::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each document as a pretty-printed JSON file in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Base directory for document storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/sketchpad/drawings/`
    /// On Windows: `%LOCALAPPDATA%\sketchpad\drawings\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("sketchpad").join("drawings"))
    }

    /// Get the file path for a key.
    fn document_path(&self, key: &str) -> PathBuf {
        // Keys become file names
        let safe_key: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, document: &Document) -> StorageResult<()> {
        let path = self.document_path(key);
        let json = document
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn load(&self, key: &str) -> StorageResult<Document> {
        let path = self.document_path(key);
        if !path.exists() {
            return Err(StorageError::NotFound(key.to_string()));
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        Document::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.document_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.document_path(key).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Palette, Rectangle, SerializableColor, Shape, ShapeStyle};
    use kurbo::Point;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut doc = Document::new();
        let mut rect = Rectangle::new(Point::new(0.1, 0.7), 33.3, 12.25);
        rect.style = ShapeStyle::new(
            Palette::new(Some(SerializableColor::new(10, 20, 30, 255)), SerializableColor::black()),
            3.5,
        );
        doc.add_shape(Shape::Rectangle(rect));
        doc.add_shape(Shape::Ellipse(Ellipse::new(Point::new(5.0, 5.0), 2.0, 1.0)));

        storage.save("test-doc", &doc).unwrap();
        let loaded = storage.load("test-doc").unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = storage.load("nonexistent");
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{ nope").unwrap();

        let result = storage.load("broken");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_file_storage_exists_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let doc = Document::new();
        storage.save("doc1", &doc).unwrap();
        storage.save("doc2", &doc).unwrap();

        storage.delete("doc1").unwrap();
        assert!(!storage.exists("doc1").unwrap());
        assert!(storage.exists("doc2").unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_key() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut doc = Document::new();
        doc.add_shape(Shape::Ellipse(Ellipse::new(Point::new(1.0, 2.0), 3.0, 4.0)));
        storage.save("test/doc:with*special", &doc).unwrap();
        assert!(dir.path().join("test_doc_with_special.json").exists());

        let loaded = storage.load("test/doc:with*special").unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert_eq!(storage.base_path(), nested.as_path());
        assert!(nested.is_dir());
    }
}
