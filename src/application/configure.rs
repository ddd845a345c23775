//! Wiring listeners from configuration into an editor.

use std::sync::Arc;

use crate::adapters::listeners::{EmailAlertsListener, LoggingListener};
use crate::application::Editor;
use crate::config::{AppConfig, EmailConfig, ListenerConfig};
use crate::ports::{DocumentStorage, EventListener, MailTransport};

/// Builds the listener described by one configuration entry.
pub fn build_listener(
    listener: &ListenerConfig,
    email: &EmailConfig,
    transport: &Arc<dyn MailTransport>,
) -> Arc<dyn EventListener> {
    match listener {
        ListenerConfig::Log {
            path,
            message,
            timestamps,
            ..
        } => Arc::new(
            LoggingListener::new(path.clone(), message.clone()).with_timestamps(*timestamps),
        ),
        ListenerConfig::Email {
            to,
            message,
            subject,
            ..
        } => {
            let alerts = EmailAlertsListener::new(
                Arc::clone(transport),
                email.from_header(),
                to.clone(),
                message.clone(),
            );
            match subject {
                Some(subject) => Arc::new(alerts.with_subject(subject.clone())),
                None => Arc::new(alerts),
            }
        }
    }
}

/// Creates an editor and subscribes every configured listener, in order.
pub fn configure_editor(
    config: &AppConfig,
    storage: Arc<dyn DocumentStorage>,
    transport: Arc<dyn MailTransport>,
) -> Editor {
    let editor = Editor::new(storage);

    for entry in &config.listeners {
        let listener = build_listener(entry, &config.email, &transport);
        editor.subscribe(entry.event().clone(), listener);
    }

    tracing::info!(
        listeners = config.listeners.len(),
        event_types = ?editor.events().event_types(),
        "Editor configured"
    );
    editor
}
