//! Foundation module - Shared domain primitives.
//!
//! Contains value objects and error types that form the vocabulary
//! of the editor event domain.

mod errors;
mod event_type;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use event_type::EventType;
pub use timestamp::Timestamp;
