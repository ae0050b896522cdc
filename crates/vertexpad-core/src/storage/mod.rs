//! Storage abstraction for saved scenes.

mod file;
mod memory;
mod snapshot;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use snapshot::{SceneSnapshot, ShapeRecord};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Scene not found: {0}")]
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

/// Trait for scene storage backends.
///
/// Calls complete before returning; the editor is single-threaded and
/// never waits on storage from inside an event handler.
pub trait Storage {
    /// Save a scene under `id`, replacing any previous one.
    fn save(&self, id: &str, snapshot: &SceneSnapshot) -> StorageResult<()>;

    /// Load the scene saved under `id`.
    fn load(&self, id: &str) -> StorageResult<SceneSnapshot>;

    /// Delete a scene. Deleting a missing scene is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all saved scene IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a scene exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;
}
