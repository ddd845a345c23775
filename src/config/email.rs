//! Email configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::email::DEFAULT_RESEND_BASE_URL;

/// Email configuration (Resend)
///
/// Without an API key, alert e-mails are captured in memory instead of sent.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    #[serde(default)]
    pub resend_api_key: Option<SecretString>,

    /// Resend API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// True when real delivery is configured
    pub fn has_api_key(&self) -> bool {
        self.resend_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate email configuration
    ///
    /// An empty key counts as unset, so `EDITOR_EVENTS__EMAIL__RESEND_API_KEY=`
    /// falls back to in-memory delivery instead of failing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.has_api_key() {
            let key = self.resend_api_key.as_ref().map(|k| k.expose_secret().as_str());
            if !key.is_some_and(|k| k.starts_with("re_")) {
                return Err(ValidationError::InvalidResendKey);
            }
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            api_base_url: default_api_base_url(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_RESEND_BASE_URL.to_string()
}

fn default_from_email() -> String {
    "noreply@editor-events.local".to_string()
}

fn default_from_name() -> String {
    "Editor Events".to_string()
}
