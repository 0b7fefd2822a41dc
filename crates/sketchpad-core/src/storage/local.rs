//! `window.localStorage` storage implementation for WebAssembly.
//!
//! Documents are stored as JSON strings under their key.

use super::{Storage, StorageError, StorageResult};
use crate::document::Document;

/// Browser `localStorage`-backed storage.
///
/// Note: Not Send/Sync; WASM is single-threaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn handle(&self) -> StorageResult<web_sys::Storage> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Other("No window object".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Other(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Other("localStorage not available".to_string()))
    }
}

impl Storage for LocalStorage {
    fn save(&self, key: &str, document: &Document) -> StorageResult<()> {
        let json = serde_json::to_string(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.handle()?
            .set_item(key, &json)
            // Quota exceeded lands here
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
    }

    fn load(&self, key: &str) -> StorageResult<Document> {
        let json = self
            .handle()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Document::from_json(&json)
            .map_err(|e| StorageError::Serialization(format!("Failed to parse {}: {}", key, e)))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to delete {}: {:?}", key, e)))
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let item = self
            .handle()?
            .get_item(key)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {:?}", key, e)))?;
        Ok(item.is_some())
    }
}
