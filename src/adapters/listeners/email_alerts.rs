//! EmailAlertsListener - sends an alert e-mail per notification.

use std::sync::Arc;

use crate::domain::document::MessageTemplate;
use crate::domain::foundation::DomainError;
use crate::ports::{EmailMessage, EventListener, MailTransport};

const DEFAULT_SUBJECT: &str = "File notification: %s";

/// Hands `template.render(payload)` to a [`MailTransport`].
///
/// Delivery failures surface as `MAIL_DELIVERY_FAILED` errors, which stop
/// the current dispatch like any other listener error.
pub struct EmailAlertsListener {
    transport: Arc<dyn MailTransport>,
    from: String,
    to: String,
    subject: MessageTemplate,
    template: MessageTemplate,
}

impl EmailAlertsListener {
    /// Creates a listener mailing `to` with the default subject line.
    pub fn new(
        transport: Arc<dyn MailTransport>,
        from: impl Into<String>,
        to: impl Into<String>,
        template: MessageTemplate,
    ) -> Self {
        Self {
            transport,
            from: from.into(),
            to: to.into(),
            subject: MessageTemplate::from_static(DEFAULT_SUBJECT),
            template,
        }
    }

    /// Overrides the subject line; `%s` is replaced by the payload.
    pub fn with_subject(mut self, subject: MessageTemplate) -> Self {
        self.subject = subject;
        self
    }

    fn compose(&self, payload: &str) -> EmailMessage {
        EmailMessage {
            from: self.from.clone(),
            to: self.to.clone(),
            subject: self.subject.render(payload),
            body: self.template.render(payload),
        }
    }
}

impl EventListener for EmailAlertsListener {
    fn update(&self, payload: &str) -> Result<(), DomainError> {
        let message = self.compose(payload);
        self.transport.send(&message).map_err(|e| {
            DomainError::from(e).with_detail("recipient", self.to.clone())
        })?;

        tracing::debug!(to = %self.to, "Sent alert e-mail");
        Ok(())
    }

    fn name(&self) -> &str {
        "EmailAlertsListener"
    }
}
