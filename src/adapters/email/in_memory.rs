//! In-memory mail transport.
//!
//! Captures messages instead of delivering them. Used by tests and by the
//! binary's dry-run mode when no Resend key is configured.

use parking_lot::Mutex;

use crate::ports::{EmailMessage, MailError, MailTransport};

/// Mail transport that records every accepted message.
///
/// # Example
///
/// ```ignore
/// let transport = Arc::new(InMemoryMailTransport::new());
/// // ... notify listeners ...
/// assert_eq!(transport.sent_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMailTransport {
    sent: Mutex<Vec<EmailMessage>>,
    next_failure: Mutex<Option<String>>,
}

impl InMemoryMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Returns all accepted messages.
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }

    /// Returns count of accepted messages.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Makes the next `send` fail with a network error.
    pub fn fail_next(&self, reason: impl Into<String>) {
        *self.next_failure.lock() = Some(reason.into());
    }
}

impl MailTransport for InMemoryMailTransport {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        if let Some(reason) = self.next_failure.lock().take() {
            return Err(MailError::Network(reason));
        }

        tracing::info!(to = %message.to, subject = %message.subject, "Captured e-mail");
        self.sent.lock().push(message.clone());
        Ok(())
    }
}
