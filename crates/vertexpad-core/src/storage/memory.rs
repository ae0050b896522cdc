//! In-memory storage implementation.

use super::{SceneSnapshot, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    scenes: RwLock<HashMap<String, SceneSnapshot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {e}"))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, snapshot: &SceneSnapshot) -> StorageResult<()> {
        let mut scenes = self.scenes.write().map_err(lock_error)?;
        scenes.insert(id.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<SceneSnapshot> {
        let scenes = self.scenes.read().map_err(lock_error)?;
        scenes
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut scenes = self.scenes.write().map_err(lock_error)?;
        scenes.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let scenes = self.scenes.read().map_err(lock_error)?;
        Ok(scenes.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let scenes = self.scenes.read().map_err(lock_error)?;
        Ok(scenes.contains_key(id))
    }
}
