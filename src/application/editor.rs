//! Editor - business object that announces document activity.
//!
//! The editor owns an [`EventBus`] by composition rather than being one.
//! Producers of `open`/`save` notifications therefore depend only on the
//! bus, never on concrete listener types.

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::events::EventBus;
use crate::domain::document::Document;
use crate::domain::foundation::{DomainError, ErrorCode, EventType};
use crate::ports::{DocumentStorage, EventListener};

/// Text editor that notifies listeners when documents are opened or saved.
///
/// # Example
///
/// ```ignore
/// let mut editor = Editor::new(Arc::new(LocalFileStorage::new(".")));
/// editor.subscribe(EventType::OPEN, logger);
///
/// editor.open_file("report.txt")?; // logger receives "report.txt"
/// ```
pub struct Editor {
    events: EventBus,
    storage: Arc<dyn DocumentStorage>,
    document: Option<Document>,
}

impl Editor {
    /// Creates an editor with an empty event bus and no open document.
    pub fn new(storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            events: EventBus::new(),
            storage,
            document: None,
        }
    }

    /// The editor's event bus.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, event_type: impl Into<EventType>, listener: Arc<dyn EventListener>) {
        self.events.subscribe(event_type, listener);
    }

    pub fn unsubscribe(&self, event_type: impl AsRef<str>, listener: &Arc<dyn EventListener>) -> bool {
        self.events.unsubscribe(event_type, listener)
    }

    /// Loads a document and notifies `open` listeners with its file name.
    ///
    /// The document stays open even when a listener fails; the listener
    /// error is still returned.
    ///
    /// # Errors
    ///
    /// - `DOCUMENT_NOT_FOUND` / `STORAGE_FAILED` if the file can't be read
    ///   (no notification is sent)
    /// - Any listener error from the `open` dispatch
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<(), DomainError> {
        let path = path.into();
        let content = self.storage.read(&path)?;
        let document = Document::new(path, content);
        let name = document.name();

        tracing::info!(document = %name, "Opened document");
        self.document = Some(document);

        self.events.notify(EventType::OPEN, &name)
    }

    /// Writes the open document and notifies `save` listeners.
    ///
    /// # Errors
    ///
    /// - `NO_DOCUMENT_OPEN` if nothing has been opened
    /// - `STORAGE_FAILED` if the write fails (no notification is sent)
    /// - Any listener error from the `save` dispatch
    pub fn save_file(&mut self) -> Result<(), DomainError> {
        let document = self.document.as_mut().ok_or_else(|| {
            DomainError::new(ErrorCode::NoDocumentOpen, "No document is open")
        })?;

        self.storage.write(document.path(), document.content())?;
        document.mark_saved();
        let name = document.name();

        tracing::info!(document = %name, "Saved document");
        self.events.notify(EventType::SAVE, &name)
    }

    /// Replaces the text of the open document.
    ///
    /// # Errors
    ///
    /// `NO_DOCUMENT_OPEN` if nothing has been opened.
    pub fn set_content(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        match self.document.as_mut() {
            Some(document) => {
                document.set_content(content);
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::NoDocumentOpen, "No document is open")),
        }
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.document.as_ref()
    }
}
