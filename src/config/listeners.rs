//! Listener subscriptions configuration
//!
//! Each entry names the event a listener is subscribed to and what the
//! listener does with the notification.
//!
//! ```yaml
//! listeners:
//!   - kind: log
//!     event: open
//!     path: /path/to/log.txt
//!     message: "Someone has opened file: %s"
//!   - kind: email
//!     event: save
//!     to: admin@example.com
//!     message: "Someone has changed the file: %s"
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::document::MessageTemplate;
use crate::domain::foundation::EventType;

/// One listener subscription
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ListenerConfig {
    /// Append a line to a log file
    Log {
        event: EventType,
        path: PathBuf,
        message: MessageTemplate,
        /// Prefix lines with an RFC 3339 timestamp
        #[serde(default)]
        timestamps: bool,
    },

    /// Send an alert e-mail
    Email {
        event: EventType,
        to: String,
        message: MessageTemplate,
        #[serde(default)]
        subject: Option<MessageTemplate>,
    },
}

impl ListenerConfig {
    /// Event type this listener subscribes to
    pub fn event(&self) -> &EventType {
        match self {
            ListenerConfig::Log { event, .. } | ListenerConfig::Email { event, .. } => event,
        }
    }

    /// Validate a listener entry
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ListenerConfig::Log { event, path, .. } => {
                if path.as_os_str().is_empty() {
                    return Err(ValidationError::EmptyLogPath {
                        event: event.to_string(),
                    });
                }
            }
            ListenerConfig::Email { event, to, .. } => {
                if !to.contains('@') {
                    return Err(ValidationError::InvalidRecipient {
                        event: event.to_string(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
