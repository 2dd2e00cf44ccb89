//! Named-event registration and synchronous dispatch
//!
//! A [`Dispatcher`] owns an ordered list of [`EventEntry`] values, one per
//! event name. Listeners run synchronously, in registration order, on the
//! caller's thread. Lookup failures are reported to an optional error
//! handler as a [`StatusCode`]; diagnostics go to a separate
//! [`DiagnosticSink`] that silent mode switches off.

mod entry;
mod listener;

pub use entry::{EntryKind, EventEntry};
pub use listener::{Listener, ListenerId, ListenerList};

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{DispatcherConfig, LogMode};
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::StatusCode;

/// Callback notified with a status code on lookup failures
pub type ErrorHandler = Box<dyn Fn(StatusCode) + Send + Sync>;

/// Listeners to run for one dispatch, captured before any of them is called
pub(crate) struct DispatchPlan {
    pub(crate) listeners: Vec<Listener>,
    pub(crate) kind: EntryKind,
}

/// Synchronous publish/subscribe dispatcher.
///
/// Not internally synchronized. Callers sharing one dispatcher across
/// threads must wrap it in a mutex (see [`crate::global`]). The error
/// handler and the diagnostic sink run while the dispatcher is borrowed, so
/// they must not lock it either.
pub struct Dispatcher {
    entries: Vec<EventEntry>,
    max_listeners: usize,
    logging_enabled: bool,
    error_handler: Option<ErrorHandler>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Dispatcher {
    /// Create a dispatcher with logging on and the default listener cap
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create a dispatcher that writes no diagnostics
    pub fn silent() -> Self {
        Self::with_mode(LogMode::Silent)
    }

    /// Create a dispatcher with the given log mode and the default cap
    pub fn with_mode(mode: LogMode) -> Self {
        Self::with_config(DispatcherConfig {
            mode,
            ..DispatcherConfig::default()
        })
    }

    /// Create a dispatcher from a full configuration
    pub fn with_config(config: DispatcherConfig) -> Self {
        trace!(
            mode = ?config.mode,
            max_listeners = config.max_listeners,
            "Creating dispatcher"
        );
        Self {
            entries: Vec::new(),
            max_listeners: config.max_listeners,
            logging_enabled: config.mode.logging_enabled(),
            error_handler: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// Replace the diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Set the advisory listener cap. Exceeding it only warns.
    pub fn set_max_listeners(&mut self, n: usize) -> &mut Self {
        self.max_listeners = n;
        self
    }

    /// Current advisory listener cap
    pub fn max_listeners(&self) -> usize {
        self.max_listeners
    }

    /// Whether diagnostics reach the sink (false in silent mode)
    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Register a listener that stays until removed
    pub fn on(&mut self, name: &str, listener: Listener) -> &mut Self {
        self.register(name, listener, EntryKind::Persistent)
    }

    /// Register a listener on an entry that is dropped after its first
    /// dispatch. Has no effect on the kind of an entry that already exists.
    pub fn once(&mut self, name: &str, listener: Listener) -> &mut Self {
        self.register(name, listener, EntryKind::OneShot)
    }

    fn register(&mut self, name: &str, listener: Listener, kind: EntryKind) -> &mut Self {
        let listener_id = listener.id();

        let Some(index) = self.position(name) else {
            debug!(event = %name, listener_id = %listener_id, kind = %kind, "Registered event");
            self.entries.push(EventEntry::new(name, listener, kind));
            return self;
        };

        match self.entries[index].listeners.push_unique(listener) {
            Some(count) => {
                debug!(
                    event = %name,
                    listener_id = %listener_id,
                    listeners = count,
                    "Added listener"
                );
                if count > self.max_listeners && self.logging_enabled {
                    self.sink.max_limit(name, self.max_listeners);
                }
            }
            None => {
                trace!(
                    event = %name,
                    listener_id = %listener_id,
                    "Listener already registered"
                );
            }
        }

        self
    }

    /// Run every listener registered under `name`, in registration order.
    ///
    /// Listeners run from a snapshot taken before the first call. A panic in
    /// a listener propagates: the remaining listeners do not run and a
    /// one-shot entry stays registered.
    ///
    /// Listeners must not lock the dispatcher that is running them. For a
    /// dispatcher behind a mutex, use [`crate::global::emit`] or the same
    /// prepare/run/finish split so the lock is not held during the calls.
    pub fn emit(&mut self, name: &str) -> &mut Self {
        if let Some(plan) = self.prepare_dispatch(name) {
            for listener in &plan.listeners {
                listener.call();
            }
            if plan.kind == EntryKind::OneShot {
                self.finish_one_shot(name);
            }
        }

        self
    }

    /// Look up `name`, report lookup failures and snapshot its listeners.
    /// `None` means there is nothing to run.
    pub(crate) fn prepare_dispatch(&self, name: &str) -> Option<DispatchPlan> {
        let Some(entry) = self.entry(name) else {
            if self.logging_enabled {
                self.sink.not_found(name);
            }
            self.report(StatusCode::NotFound);
            return None;
        };

        let listeners = entry.listeners.to_vec();
        if listeners.is_empty() {
            self.report(StatusCode::NoListeners);
        }

        trace!(event = %name, listeners = listeners.len(), "Dispatching event");
        Some(DispatchPlan {
            listeners,
            kind: entry.kind(),
        })
    }

    /// Drop the one-shot entry for `name` once its dispatch has finished
    pub(crate) fn finish_one_shot(&mut self, name: &str) {
        let Some(index) = self.position(name) else {
            return;
        };
        if self.entries[index].kind() == EntryKind::OneShot {
            self.entries.remove(index);
            debug!(event = %name, "Removed one-shot event after dispatch");
        }
    }

    /// Remove one listener. The entry itself stays, even when emptied.
    pub fn remove_listener(&mut self, name: &str, listener: &Listener) -> &mut Self {
        let Some(entry) = self.entry(name) else {
            self.report(StatusCode::NotFound);
            return self;
        };

        if entry.listeners.remove(listener) {
            debug!(event = %name, listener_id = %listener.id(), "Removed listener");
        } else {
            self.report(StatusCode::NoListeners);
        }

        self
    }

    /// Clear the listeners of the named entries, or of every entry when
    /// `names` is empty. Unknown names are ignored. Entries stay registered
    /// and keep their kind.
    pub fn remove_all_listeners(&mut self, names: &[&str]) -> &mut Self {
        if names.is_empty() {
            for entry in &mut self.entries {
                entry.clear();
            }
            debug!(events = self.entries.len(), "Cleared all listeners");
            return self;
        }

        for name in names {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.name() == *name) {
                entry.clear();
                debug!(event = %name, "Cleared listeners");
            }
        }

        self
    }

    /// Live listener sequence for `name`.
    ///
    /// An unknown name reports [`StatusCode::NoListeners`] and yields `None`
    /// rather than an empty sequence.
    pub fn listeners(&self, name: &str) -> Option<ListenerList> {
        match self.entry(name) {
            Some(entry) => Some(entry.listeners()),
            None => {
                self.report(StatusCode::NoListeners);
                None
            }
        }
    }

    /// Install the error handler. Not chainable.
    pub fn catch<F>(&mut self, handler: F)
    where
        F: Fn(StatusCode) + Send + Sync + 'static,
    {
        self.error_handler = Some(Box::new(handler));
    }

    /// Remove the error handler; failures become silent again
    pub fn clear_catch(&mut self) {
        self.error_handler = None;
    }

    /// Entry registered under `name`
    pub fn entry(&self, name: &str) -> Option<&EventEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn contains_listener(&self, name: &str, listener: &Listener) -> bool {
        self.entry(name).is_some_and(|e| e.contains(listener))
    }

    /// Registered event names, in creation order
    pub fn event_names(&self) -> Vec<&str> {
        self.entries.iter().map(EventEntry::name).collect()
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.entry(name).map_or(0, |e| e.listeners.len())
    }

    /// Number of registered entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    fn report(&self, status: StatusCode) {
        trace!(code = status.code(), "Reporting dispatch status");
        if let Some(handler) = &self.error_handler {
            handler(status);
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("entries", &self.entries)
            .field("max_listeners", &self.max_listeners)
            .field("logging_enabled", &self.logging_enabled)
            .field("has_error_handler", &self.error_handler.is_some())
            .finish()
    }
}
