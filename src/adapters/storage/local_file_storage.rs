//! Local Filesystem Storage Adapter - Implementation of DocumentStorage.
//!
//! Relative document paths are resolved against a root directory; absolute
//! paths are used as given. Writes are atomic.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ports::{DocumentStorage, StorageError};

/// Maximum file size allowed (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for editor documents.
///
/// # Atomic Writes
///
/// Uses a write-to-temp-then-rename pattern:
/// 1. Write content to `{name}.tmp` next to the target
/// 2. Sync to disk
/// 3. Rename over the target
///
/// This prevents partial writes if the process crashes during write.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    /// Directory relative paths are resolved against.
    root: PathBuf,
}

impl LocalFileStorage {
    /// Creates a storage rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        path.with_file_name(name)
    }

    fn persist(
        file: &mut fs::File,
        content: &str,
        temp_path: &Path,
        final_path: &Path,
    ) -> Result<(), StorageError> {
        file.write_all(content.as_bytes())
            .map_err(|e| Self::map_io(temp_path, "write", e))?;
        file.sync_all()
            .map_err(|e| Self::map_io(temp_path, "sync", e))?;

        fs::rename(temp_path, final_path).map_err(|e| {
            StorageError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    fn map_io(path: &Path, action: &str, e: std::io::Error) -> StorageError {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::permission_denied(path.display().to_string())
            }
            _ => StorageError::io(format!("Failed to {} {}: {}", action, path.display(), e)),
        }
    }
}

impl DocumentStorage for LocalFileStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let path = self.resolve(path);

        let size = fs::metadata(&path)
            .map_err(|e| Self::map_io(&path, "stat", e))?
            .len();
        if size > MAX_FILE_SIZE_BYTES {
            return Err(StorageError::file_too_large(size, MAX_FILE_SIZE_BYTES));
        }

        fs::read_to_string(&path).map_err(|e| Self::map_io(&path, "read", e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), StorageError> {
        let size = content.len() as u64;
        if size > MAX_FILE_SIZE_BYTES {
            return Err(StorageError::file_too_large(size, MAX_FILE_SIZE_BYTES));
        }

        let final_path = self.resolve(path);
        if let Some(parent) = final_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Self::map_io(parent, "create directory", e))?;
        }

        let temp_path = Self::temp_path(&final_path);
        let mut file =
            fs::File::create(&temp_path).map_err(|e| Self::map_io(&temp_path, "create", e))?;

        let result = Self::persist(&mut file, content, &temp_path, &final_path);
        if result.is_err() {
            // Best effort; the original error is what the caller needs
            if let Err(e) = fs::remove_file(&temp_path) {
                tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_then_read_relative_path() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        storage.write(Path::new("notes/today.md"), "# Today").unwrap();

        assert_eq!(storage.read(Path::new("notes/today.md")).unwrap(), "# Today");
        assert!(dir.path().join("notes/today.md").exists());
    }

    #[test]
    fn absolute_paths_ignore_root() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        let target = other.path().join("a.txt");

        storage.write(&target, "abs").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "abs");
    }

    #[test]
    fn write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        storage.write(Path::new("a.txt"), "one").unwrap();
        storage.write(Path::new("a.txt"), "two").unwrap();

        assert_eq!(storage.read(Path::new("a.txt")).unwrap(), "two");
        assert!(!dir.path().join("a.txt.tmp").exists());
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path());

        let err = storage.read(Path::new("missing.txt")).unwrap_err();

        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path());
        // A non-empty directory cannot be replaced by a file rename
        fs::create_dir_all(dir.path().join("taken/inner")).unwrap();

        let err = storage.write(Path::new("taken"), "content").unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
        assert!(!dir.path().join("taken.tmp").exists());
        assert!(dir.path().join("taken/inner").is_dir());
    }

    #[test]
    fn temp_path_appends_suffix() {
        assert_eq!(
            LocalFileStorage::temp_path(Path::new("/x/report.txt")),
            PathBuf::from("/x/report.txt.tmp")
        );
    }
}
