//! Storage abstraction for persistence.

mod autosave;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use autosave::{AutoSaver, PlatformStorage, create_default_storage};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::document::Document;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for document storage backends.
///
/// Implementations can store documents in memory, the filesystem, or the
/// browser's `localStorage` (WASM). Documents are keyed by string.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a document, replacing any previous one under `key`.
    fn save(&self, key: &str, document: &Document) -> StorageResult<()>;

    /// Load a document. Fails with [`StorageError::NotFound`] when absent.
    fn load(&self, key: &str) -> StorageResult<Document>;

    /// Delete a document. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a document exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Trait for document storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a document, replacing any previous one under `key`.
    fn save(&self, key: &str, document: &Document) -> StorageResult<()>;

    /// Load a document. Fails with [`StorageError::NotFound`] when absent.
    fn load(&self, key: &str) -> StorageResult<Document>;

    /// Delete a document. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if a document exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
