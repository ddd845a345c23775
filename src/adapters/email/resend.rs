//! Resend mail transport.
//!
//! Sends alert e-mails through the Resend HTTP API using a blocking client,
//! matching the synchronous dispatch model of the event bus.
//!
//! # Security
//!
//! - API key held in `secrecy::SecretString` and only exposed for the
//!   Authorization header

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{EmailMessage, MailError, MailTransport};

/// Default Resend API endpoint.
pub const DEFAULT_RESEND_BASE_URL: &str = "https://api.resend.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resend API configuration.
#[derive(Clone)]
pub struct ResendConfig {
    /// Resend API key (re_...).
    api_key: SecretString,

    /// Base URL for the Resend API (default: https://api.resend.com).
    api_base_url: String,
}

impl ResendConfig {
    /// Create a new Resend configuration.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            api_base_url: DEFAULT_RESEND_BASE_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.api_base_url.trim_end_matches('/'))
    }
}

/// Request body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendEmailRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            text: &message.body,
        }
    }
}

/// Mail transport backed by the Resend API.
pub struct ResendMailTransport {
    config: ResendConfig,
    http_client: reqwest::blocking::Client,
}

impl ResendMailTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: ResendConfig) -> Result<Self, MailError> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MailError::Network(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

impl MailTransport for ResendMailTransport {
    fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let response = self
            .http_client
            .post(self.config.emails_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&SendEmailRequest::from(message))
            .send()
            .map_err(|e| {
                tracing::error!("Failed to reach Resend: {}", e);
                MailError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!("Resend returned {}", status);
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(to = %message.to, "Delivered e-mail via Resend");
        Ok(())
    }
}
