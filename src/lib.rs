//! Editor Events - synchronous publish/subscribe for a file editor
//!
//! An [`adapters::EventBus`] maps event types to ordered listener lists and
//! dispatches notifications on the caller's thread. The [`application::Editor`]
//! owns a bus and announces `open` and `save` activity to logging and e-mail
//! alert listeners wired from configuration.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
