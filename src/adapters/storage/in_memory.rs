//! In-Memory Document Storage Adapter
//!
//! Keeps documents in a map keyed by path. Useful for testing.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ports::{DocumentStorage, StorageError};

/// In-memory storage for documents
#[derive(Debug, Default)]
pub struct InMemoryDocumentStorage {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl InMemoryDocumentStorage {
    /// Create a new empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one file
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.write().insert(path.into(), content.into());
        self
    }
}

impl DocumentStorage for InMemoryDocumentStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path.display().to_string()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
