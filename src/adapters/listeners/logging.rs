//! LoggingListener - appends a formatted line to a log file per notification.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::domain::document::MessageTemplate;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::EventListener;

/// Writes `template.render(payload)` as one line to a log file.
///
/// The file is opened in append mode on every update and created if it
/// does not exist. Appends from concurrent notifications are serialized.
///
/// # Example
///
/// ```ignore
/// let logger = LoggingListener::new(
///     "/path/to/log.txt",
///     MessageTemplate::new("Someone has opened file: %s")?,
/// );
/// editor.subscribe(EventType::OPEN, Arc::new(logger));
/// ```
#[derive(Debug)]
pub struct LoggingListener {
    log_path: PathBuf,
    template: MessageTemplate,
    timestamps: bool,
    write_lock: Mutex<()>,
}

impl LoggingListener {
    pub fn new(log_path: impl Into<PathBuf>, template: MessageTemplate) -> Self {
        Self {
            log_path: log_path.into(),
            template,
            timestamps: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Prefix each line with an RFC 3339 UTC timestamp.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    fn format_line(&self, payload: &str) -> String {
        let message = self.template.render(payload);
        if self.timestamps {
            format!("{} {}", Timestamp::now().to_rfc3339(), message)
        } else {
            message
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", line)
    }
}

impl EventListener for LoggingListener {
    fn update(&self, payload: &str) -> Result<(), DomainError> {
        let line = self.format_line(payload);
        self.append(&line).map_err(|e| {
            DomainError::new(
                ErrorCode::LogWriteFailed,
                format!("Failed to append to {}: {}", self.log_path.display(), e),
            )
            .with_detail("path", self.log_path.display().to_string())
        })?;

        tracing::debug!(path = %self.log_path.display(), "Appended log line");
        Ok(())
    }

    fn name(&self) -> &str {
        "LoggingListener"
    }
}
