//! MailTransport port - hands alert e-mails to an external channel.
//!
//! Delivery failure is the transport's concern; listeners only surface it.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// A single outgoing e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Formatted "From" header, e.g. `Editor Events <alerts@example.com>`.
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Port for sending e-mail.
pub trait MailTransport: Send + Sync {
    /// Send one message, blocking until the channel accepted or refused it.
    fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Errors that can occur while handing a message to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailError {
    /// The request never reached the provider.
    #[error("Mail transport unreachable: {0}")]
    Network(String),

    /// The provider answered with a failure status.
    #[error("Mail provider rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

impl From<MailError> for DomainError {
    fn from(err: MailError) -> Self {
        DomainError::new(ErrorCode::MailDeliveryFailed, err.to_string())
    }
}
