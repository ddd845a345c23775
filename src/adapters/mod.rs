//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the editor to external systems:
//! - `events` - In-process event bus
//! - `listeners` - Logging and e-mail alert listeners
//! - `email` - Mail transports (Resend, in-memory)
//! - `storage` - Document storage (local filesystem, in-memory)

pub mod email;
pub mod events;
pub mod listeners;
pub mod storage;

pub use email::{InMemoryMailTransport, ResendConfig, ResendMailTransport};
pub use events::EventBus;
pub use listeners::{EmailAlertsListener, LoggingListener};
pub use storage::{InMemoryDocumentStorage, LocalFileStorage};
