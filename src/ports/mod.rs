//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the editor and the outside world. Adapters implement these ports.
//!
//! - `EventListener` - Capability invoked by the event bus on notify
//! - `DocumentStorage` - Where documents are read from and written to
//! - `MailTransport` - Outgoing e-mail channel used by alert listeners

mod document_storage;
mod event_listener;
mod mail_transport;

pub use document_storage::{DocumentStorage, StorageError};
pub use event_listener::{listener_fn, EventListener, FnListener};
pub use mail_transport::{EmailMessage, MailError, MailTransport};
