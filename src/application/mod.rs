//! Application layer - the editor and its configuration-driven wiring.
//!
//! This layer coordinates domain types, the event bus and ports.

mod configure;
mod editor;

pub use configure::{build_listener, configure_editor};
pub use editor::Editor;
