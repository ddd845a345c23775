//! EventListener port - the capability a subscriber exposes to the bus.
//!
//! Producers depend only on the bus; the bus depends only on this trait.
//! Concrete listeners differ solely in what `update` does internally.

use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::DomainError;

/// Receiver of event notifications.
///
/// `update` runs synchronously on the notifying thread. A returned error
/// aborts the remaining dispatch for that notification and reaches the
/// caller of `notify`.
///
/// # Example
///
/// ```ignore
/// struct AuditTrail { /* ... */ }
///
/// impl EventListener for AuditTrail {
///     fn update(&self, payload: &str) -> Result<(), DomainError> {
///         // Record the payload...
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "AuditTrail"
///     }
/// }
/// ```
pub trait EventListener: Send + Sync {
    /// React to one notification.
    fn update(&self, payload: &str) -> Result<(), DomainError>;

    /// Listener name for logging and error context.
    fn name(&self) -> &str;
}

/// Adapts a closure into an [`EventListener`].
pub struct FnListener<F> {
    name: String,
    callback: F,
}

impl<F> FnListener<F>
where
    F: Fn(&str) -> Result<(), DomainError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
        }
    }
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&str) -> Result<(), DomainError> + Send + Sync,
{
    fn update(&self, payload: &str) -> Result<(), DomainError> {
        (self.callback)(payload)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnListener<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnListener").field("name", &self.name).finish()
    }
}

/// Wraps a closure as a shareable listener handle ready for `subscribe`.
///
/// ```ignore
/// let printer = listener_fn("printer", |payload| {
///     println!("opened {payload}");
///     Ok(())
/// });
/// bus.subscribe(EventType::OPEN, printer.clone());
/// ```
pub fn listener_fn<F>(name: impl Into<String>, callback: F) -> Arc<dyn EventListener>
where
    F: Fn(&str) -> Result<(), DomainError> + Send + Sync + 'static,
{
    Arc::new(FnListener::new(name, callback))
}
