//! Concrete event listeners.
//!
//! - `LoggingListener` - Appends a formatted line to a log file
//! - `EmailAlertsListener` - Sends an alert through a `MailTransport`

mod email_alerts;
mod logging;

pub use email_alerts::EmailAlertsListener;
pub use logging::LoggingListener;
