//! Document module - what the editor works on and the text it announces.

mod text_document;
mod message_template;

pub use text_document::Document;
pub use message_template::{MessageTemplate, PLACEHOLDER};
