//! Document - the file an editor has open.

use std::path::{Path, PathBuf};

/// A text file loaded into the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    content: String,
    modified: bool,
}

impl Document {
    /// Creates an unmodified document with the given content.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            modified: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component of the path, falling back to the whole path.
    ///
    /// This is the payload delivered to `open` and `save` listeners.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replaces the content and marks the document as modified.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.modified = true;
    }

    /// True when the content changed since it was loaded or last saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn mark_saved(&mut self) {
        self.modified = false;
    }
}
