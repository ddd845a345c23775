//! Domain layer containing business types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (event types, timestamps, errors)
//! - `document` - Documents the editor opens and notification templates

pub mod document;
pub mod foundation;
