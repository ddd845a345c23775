//! Event bus adapters.
//!
//! - `EventBus` - Synchronous, in-process registry and dispatcher

mod event_bus;

pub use event_bus::EventBus;
