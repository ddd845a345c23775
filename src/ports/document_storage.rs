//! Document Storage Port - where the editor reads and writes files.
//!
//! The editor depends on this trait, while adapters (like LocalFileStorage)
//! provide the implementation.

use std::path::Path;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for loading and persisting document text.
///
/// # Contract
///
/// Implementations must:
/// - Return `StorageError::NotFound` for missing files on `read`
/// - Replace the whole file on `write` (no partial content on failure)
///
/// # Usage
///
/// ```rust,ignore
/// let storage: &dyn DocumentStorage = get_storage();
///
/// storage.write(Path::new("notes.md"), "# Notes")?;
/// let content = storage.read(Path::new("notes.md"))?;
/// ```
pub trait DocumentStorage: Send + Sync {
    /// Read the full text of a document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file doesn't exist.
    fn read(&self, path: &Path) -> Result<String, StorageError>;

    /// Write the full text of a document, creating parent directories.
    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError>;
}

/// Errors that can occur during document storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// File is too large.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a file too large error.
    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(err.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(err.to_string())
            }
            _ => StorageError::io(err.to_string()),
        }
    }
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        let code = match &err {
            StorageError::NotFound { .. } => ErrorCode::DocumentNotFound,
            _ => ErrorCode::StorageFailed,
        };
        DomainError::new(code, err.to_string())
    }
}
