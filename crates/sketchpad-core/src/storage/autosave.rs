//! Auto-save: persists the drawing after every committed change.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::storage::{Storage, StorageError, StorageResult};
use std::sync::Arc;

/// Writes the document under a single key whenever the editor revision
/// moves, and reads it back on request.
pub struct AutoSaver<S: Storage> {
    /// Storage backend.
    storage: Arc<S>,
    /// Key the drawing is stored under.
    key: String,
    /// Revision of the last successful save.
    saved_revision: Option<u64>,
}

impl<S: Storage> AutoSaver<S> {
    /// Create an auto-saver writing under `key`.
    pub fn new(storage: Arc<S>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            saved_revision: None,
        }
    }

    /// Create an auto-saver using the configured storage key.
    pub fn from_config(storage: Arc<S>, config: &EditorConfig) -> Self {
        Self::new(storage, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Mark the drawing as saved at `revision` without writing it, e.g.
    /// right after restoring.
    pub fn mark_saved(&mut self, revision: u64) {
        self.saved_revision = Some(revision);
    }

    /// Save the document immediately.
    pub fn save(&self, document: &Document) -> StorageResult<()> {
        self.storage.save(&self.key, document)?;
        log::debug!("autosaved {} shapes under {:?}", document.len(), self.key);
        Ok(())
    }

    /// Save if `revision` differs from the last saved one.
    /// Returns true if a save was performed. A failed save leaves the
    /// revision unsaved, so the next call tries again.
    pub fn save_if_changed(&mut self, revision: u64, document: &Document) -> StorageResult<bool> {
        if self.saved_revision == Some(revision) {
            return Ok(false);
        }
        self.save(document)?;
        self.saved_revision = Some(revision);
        Ok(true)
    }

    /// Load the saved drawing. Returns None if nothing was saved or the
    /// saved drawing has no shapes.
    pub fn restore(&self) -> StorageResult<Option<Document>> {
        match self.storage.load(&self.key) {
            Ok(document) if document.is_empty() => {
                log::debug!("saved drawing under {:?} is empty", self.key);
                Ok(None)
            }
            Ok(document) => Ok(Some(document)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::LocalStorage;

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()))
}
