//! In-process event bus.
//!
//! Owns the mapping from event type to the ordered listeners registered
//! for it and dispatches notifications synchronously on the caller's thread.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventType};
use crate::ports::EventListener;

type Registry = HashMap<EventType, Vec<Arc<dyn EventListener>>>;

/// Synchronous publish/subscribe registry.
///
/// Features:
/// - Registration order is dispatch order
/// - The same listener may be registered more than once and is then
///   invoked once per registration
/// - Dispatch is fail-fast: the first listener error stops the
///   notification and is returned to the caller
///
/// The bus holds shared `Arc` handles; listeners are never exclusively
/// owned by it. Share one bus between producers with `Arc<EventBus>`.
///
/// # Example
///
/// ```ignore
/// let bus = EventBus::new();
/// bus.subscribe(EventType::OPEN, logger.clone());
///
/// bus.notify(EventType::OPEN, "report.txt")?;
///
/// bus.unsubscribe(EventType::OPEN, &logger);
/// ```
pub struct EventBus {
    listeners: RwLock<Registry>,
}

impl EventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
        }
    }

    /// Appends `listener` to the list for `event_type`, creating the list if absent.
    pub fn subscribe(&self, event_type: impl Into<EventType>, listener: Arc<dyn EventListener>) {
        let event_type = event_type.into();
        tracing::debug!(event_type = %event_type, listener = listener.name(), "Subscribing listener");

        self.listeners
            .write()
            .entry(event_type)
            .or_default()
            .push(listener);
    }

    /// Subscribes the same listener to several event types.
    pub fn subscribe_all<I>(&self, event_types: I, listener: Arc<dyn EventListener>)
    where
        I: IntoIterator,
        I::Item: Into<EventType>,
    {
        let mut listeners = self.listeners.write();
        for event_type in event_types {
            let event_type = event_type.into();
            tracing::debug!(event_type = %event_type, listener = listener.name(), "Subscribing listener");
            listeners
                .entry(event_type)
                .or_default()
                .push(Arc::clone(&listener));
        }
    }

    /// Removes the first registration of `listener` under `event_type`.
    ///
    /// Listeners are matched by identity (same `Arc` allocation). Returns
    /// `false` without error when the event type is unknown or the
    /// listener is not registered under it.
    pub fn unsubscribe(&self, event_type: impl AsRef<str>, listener: &Arc<dyn EventListener>) -> bool {
        let event_type = event_type.as_ref();
        let mut listeners = self.listeners.write();

        let Some(registered) = listeners.get_mut(event_type) else {
            return false;
        };
        let Some(index) = registered.iter().position(|l| same_listener(l, listener)) else {
            return false;
        };

        registered.remove(index);
        if registered.is_empty() {
            listeners.remove(event_type);
        }

        tracing::debug!(event_type, listener = listener.name(), "Unsubscribed listener");
        true
    }

    /// Invokes `update(payload)` on every listener registered under
    /// `event_type`, in registration order.
    ///
    /// Unknown event types and empty lists are a no-op. The registry stays
    /// read-locked for the whole dispatch: concurrent `notify` calls proceed
    /// in parallel, while `subscribe` and `unsubscribe` wait until dispatch
    /// has finished. A listener may call `notify` again from inside `update`
    /// but must not call `subscribe` or `unsubscribe` on the same bus, which
    /// would deadlock.
    ///
    /// # Errors
    ///
    /// Returns the first listener error, annotated with `listener` and
    /// `event_type` details. Listeners after the failing one are not invoked.
    pub fn notify(&self, event_type: impl AsRef<str>, payload: &str) -> Result<(), DomainError> {
        let event_type = event_type.as_ref();

        // Recursive read so nested notify calls never queue behind a waiting writer
        let listeners = self.listeners.read_recursive();
        let Some(type_listeners) = listeners.get(event_type) else {
            return Ok(());
        };

        tracing::debug!(event_type, listeners = type_listeners.len(), "Dispatching event");

        for listener in type_listeners {
            if let Err(e) = listener.update(payload) {
                tracing::warn!(
                    event_type,
                    listener = listener.name(),
                    error = %e,
                    "Listener failed, aborting dispatch"
                );
                return Err(e
                    .with_detail("listener", listener.name())
                    .with_detail("event_type", event_type));
            }
        }

        Ok(())
    }

    /// Number of registrations under `event_type` (duplicates counted).
    pub fn subscriber_count(&self, event_type: impl AsRef<str>) -> usize {
        self.listeners
            .read()
            .get(event_type.as_ref())
            .map_or(0, Vec::len)
    }

    /// Event types with at least one registration, sorted by name.
    pub fn event_types(&self) -> Vec<EventType> {
        let mut types: Vec<EventType> = self.listeners.read().keys().cloned().collect();
        types.sort();
        types
    }

    /// True when no listener is registered under any event type.
    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read();
        let mut map = f.debug_map();
        for (event_type, registered) in listeners.iter() {
            let names: Vec<&str> = registered.iter().map(|l| l.name()).collect();
            map.entry(&event_type.as_str(), &names);
        }
        map.finish()
    }
}

// Compares data pointers only; vtable pointers for the same type may differ
// between codegen units.
fn same_listener(a: &Arc<dyn EventListener>, b: &Arc<dyn EventListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{mpsc, Mutex};
    use std::thread;
    use std::time::Duration;

    /// Records `name:payload` into a shared journal.
    struct RecordingListener {
        name: &'static str,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingListener {
        fn new(name: &'static str, journal: &Arc<Mutex<Vec<String>>>) -> Arc<dyn EventListener> {
            Arc::new(Self {
                name,
                journal: Arc::clone(journal),
            })
        }
    }

    impl EventListener for RecordingListener {
        fn update(&self, payload: &str) -> Result<(), DomainError> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, payload));
            Ok(())
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    struct FailingListener;

    impl EventListener for FailingListener {
        fn update(&self, _: &str) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::ListenerFailed, "Listener failed"))
        }

        fn name(&self) -> &str {
            "FailingListener"
        }
    }

    fn journal() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn entries(journal: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        journal.lock().unwrap().clone()
    }

    #[test]
    fn new_bus_is_empty() {
        let bus = EventBus::new();
        assert!(bus.is_empty());
        assert!(bus.event_types().is_empty());
    }

    #[test]
    fn listener_receives_payload() {
        let bus = EventBus::new();
        let log = journal();
        bus.subscribe(EventType::OPEN, RecordingListener::new("L", &log));

        bus.notify(EventType::OPEN, "report.txt").unwrap();

        assert_eq!(entries(&log), vec!["L:report.txt"]);
    }

    #[test]
    fn dispatch_follows_subscription_order() {
        let bus = EventBus::new();
        let log = journal();
        bus.subscribe("open", RecordingListener::new("first", &log));
        bus.subscribe("open", RecordingListener::new("second", &log));
        bus.subscribe("open", RecordingListener::new("third", &log));

        bus.notify("open", "x").unwrap();

        assert_eq!(entries(&log), vec!["first:x", "second:x", "third:x"]);
    }

    #[test]
    fn notify_routes_by_event_type() {
        let bus = EventBus::new();
        let log = journal();
        bus.subscribe(EventType::OPEN, RecordingListener::new("logger", &log));
        bus.subscribe(EventType::SAVE, RecordingListener::new("alerts", &log));

        bus.notify(EventType::OPEN, "report.txt").unwrap();
        assert_eq!(entries(&log), vec!["logger:report.txt"]);

        bus.notify(EventType::SAVE, "report.txt").unwrap();
        assert_eq!(entries(&log), vec!["logger:report.txt", "alerts:report.txt"]);
    }

    #[test]
    fn duplicate_subscription_delivers_twice() {
        let bus = EventBus::new();
        let log = journal();
        let listener = RecordingListener::new("L", &log);
        bus.subscribe("open", Arc::clone(&listener));
        bus.subscribe("open", Arc::clone(&listener));

        bus.notify("open", "x").unwrap();

        assert_eq!(entries(&log), vec!["L:x", "L:x"]);
        assert_eq!(bus.subscriber_count("open"), 2);
    }

    #[test]
    fn notify_without_listeners_is_noop() {
        let bus = EventBus::new();
        assert!(bus.notify("unknown", "x").is_ok());
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let bus = EventBus::new();
        let log = journal();
        let listener = RecordingListener::new("L", &log);
        bus.subscribe("open", Arc::clone(&listener));

        assert!(bus.unsubscribe("open", &listener));
        bus.notify("open", "x").unwrap();

        assert!(entries(&log).is_empty());
        assert!(bus.is_empty());
    }

    #[test]
    fn unsubscribe_removes_exactly_one_registration() {
        let bus = EventBus::new();
        let log = journal();
        let listener = RecordingListener::new("L", &log);
        bus.subscribe("open", Arc::clone(&listener));
        bus.subscribe("open", Arc::clone(&listener));

        assert!(bus.unsubscribe("open", &listener));
        bus.notify("open", "x").unwrap();

        assert_eq!(entries(&log), vec!["L:x"]);
    }

    #[test]
    fn unsubscribe_removes_first_occurrence() {
        let bus = EventBus::new();
        let log = journal();
        let a = RecordingListener::new("A", &log);
        let b = RecordingListener::new("B", &log);
        bus.subscribe("open", Arc::clone(&a));
        bus.subscribe("open", Arc::clone(&b));
        bus.subscribe("open", Arc::clone(&a));

        bus.unsubscribe("open", &a);
        bus.notify("open", "x").unwrap();

        assert_eq!(entries(&log), vec!["B:x", "A:x"]);
    }

    #[test]
    fn redundant_unsubscribe_is_noop() {
        let bus = EventBus::new();
        let log = journal();
        let listener = RecordingListener::new("L", &log);
        bus.subscribe("open", Arc::clone(&listener));

        assert!(bus.unsubscribe("open", &listener));
        assert!(!bus.unsubscribe("open", &listener));
        assert!(!bus.unsubscribe("never-registered", &listener));
    }

    #[test]
    fn unsubscribe_matches_identity_not_name() {
        let bus = EventBus::new();
        let log = journal();
        let registered = RecordingListener::new("L", &log);
        let lookalike = RecordingListener::new("L", &log);
        bus.subscribe("open", Arc::clone(&registered));

        assert!(!bus.unsubscribe("open", &lookalike));
        assert_eq!(bus.subscriber_count("open"), 1);
    }

    #[test]
    fn unsubscribe_only_affects_given_event_type() {
        let bus = EventBus::new();
        let log = journal();
        let listener = RecordingListener::new("L", &log);
        bus.subscribe("open", Arc::clone(&listener));
        bus.subscribe("save", Arc::clone(&listener));

        bus.unsubscribe("open", &listener);
        bus.notify("open", "a").unwrap();
        bus.notify("save", "b").unwrap();

        assert_eq!(entries(&log), vec!["L:b"]);
    }

    #[test]
    fn failing_listener_stops_dispatch() {
        let bus = EventBus::new();
        let log = journal();
        bus.subscribe("save", RecordingListener::new("before", &log));
        bus.subscribe("save", Arc::new(FailingListener));
        bus.subscribe("save", RecordingListener::new("after", &log));

        let err = bus.notify("save", "x").unwrap_err();

        assert_eq!(err.code, ErrorCode::ListenerFailed);
        assert_eq!(err.detail("listener"), Some("FailingListener"));
        assert_eq!(err.detail("event_type"), Some("save"));
        assert_eq!(entries(&log), vec!["before:x"]);
    }

    #[test]
    fn subscribe_all_registers_for_multiple_types() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let listener = crate::ports::listener_fn("counter", move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        bus.subscribe_all(["type.a", "type.b", "type.c"], listener);

        bus.notify("type.a", "1").unwrap();
        bus.notify("type.b", "2").unwrap();
        bus.notify("type.d", "3").unwrap(); // Not subscribed

        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(
            bus.event_types(),
            vec![
                EventType::from("type.a"),
                EventType::from("type.b"),
                EventType::from("type.c"),
            ]
        );
    }

    #[test]
    fn unsubscribe_waits_for_dispatch_in_progress() {
        let bus = Arc::new(EventBus::new());
        let log = journal();
        let (started_tx, started_rx) = mpsc::channel::<()>();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let release_rx = Mutex::new(release_rx);

        bus.subscribe(
            "open",
            crate::ports::listener_fn("slow", move |_| {
                started_tx.send(()).unwrap();
                release_rx.lock().unwrap().recv().unwrap();
                Ok(())
            }),
        );
        let second = RecordingListener::new("second", &log);
        bus.subscribe("open", Arc::clone(&second));

        let dispatcher = {
            let bus = Arc::clone(&bus);
            thread::spawn(move || bus.notify("open", "x"))
        };
        started_rx.recv().unwrap();

        let unsubscribed = Arc::new(AtomicBool::new(false));
        let remover = {
            let bus = Arc::clone(&bus);
            let second = Arc::clone(&second);
            let unsubscribed = Arc::clone(&unsubscribed);
            thread::spawn(move || {
                let removed = bus.unsubscribe("open", &second);
                unsubscribed.store(true, Ordering::SeqCst);
                removed
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!unsubscribed.load(Ordering::SeqCst));

        release_tx.send(()).unwrap();
        dispatcher.join().unwrap().unwrap();
        assert!(remover.join().unwrap());

        // Still registered for the whole of the in-flight dispatch
        assert_eq!(entries(&log), vec!["second:x"]);
        assert_eq!(bus.subscriber_count("open"), 1);
    }

    #[test]
    fn listener_can_notify_from_inside_update() {
        let bus = Arc::new(EventBus::new());
        let log = journal();
        bus.subscribe("save", RecordingListener::new("alerts", &log));

        let forwarder = {
            let bus = Arc::clone(&bus);
            crate::ports::listener_fn("forwarder", move |payload| bus.notify("save", payload))
        };
        bus.subscribe("open", forwarder);

        bus.notify("open", "report.txt").unwrap();

        assert_eq!(entries(&log), vec!["alerts:report.txt"]);
    }

    #[test]
    fn subscribe_all_accepts_event_type_constants() {
        let bus = EventBus::new();
        let log = journal();

        bus.subscribe_all([EventType::OPEN, EventType::SAVE], RecordingListener::new("L", &log));

        bus.notify(EventType::OPEN, "a").unwrap();
        bus.notify(EventType::SAVE, "b").unwrap();
        assert_eq!(entries(&log), vec!["L:a", "L:b"]);
    }

    #[test]
    fn shared_bus_across_threads() {
        let bus = Arc::new(EventBus::new());
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        bus.subscribe(
            "tick",
            crate::ports::listener_fn("counter", move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let bus = Arc::clone(&bus);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        bus.notify("tick", "t").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn debug_lists_listener_names() {
        let bus = EventBus::new();
        let log = journal();
        bus.subscribe("open", RecordingListener::new("L", &log));

        let rendered = format!("{:?}", bus);
        assert!(rendered.contains("open"));
        assert!(rendered.contains("L"));
    }
}
