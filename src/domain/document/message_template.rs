//! MessageTemplate value object - notification text with a `%s` slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Placeholder substituted with the event payload.
pub const PLACEHOLDER: &str = "%s";

/// Notification text such as `"Someone has opened file: %s"`.
///
/// Every `%s` is replaced by the payload when rendered. A template
/// without a placeholder renders unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageTemplate(String);

impl MessageTemplate {
    /// Creates a template, rejecting blank text.
    pub fn new(template: impl Into<String>) -> Result<Self, ValidationError> {
        let template = template.into();
        if template.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        Ok(Self(template))
    }

    /// Wraps a built-in, known non-blank template.
    pub(crate) fn from_static(template: &'static str) -> Self {
        Self(template.to_string())
    }

    /// Substitutes the payload into every placeholder.
    pub fn render(&self, payload: &str) -> String {
        self.0.replace(PLACEHOLDER, payload)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageTemplate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageTemplate> for String {
    fn from(template: MessageTemplate) -> Self {
        template.0
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
