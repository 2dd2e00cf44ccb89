//! Integration test harness
//! Provides a dispatcher wired to recording sinks and a call log

use std::sync::Arc;

use parking_lot::Mutex;

use dispatch_hub::{Dispatcher, DispatcherConfig, Listener, RecordingSink, StatusCode};

/// Dispatcher plus everything it reports
pub struct TestEnvironment {
    /// Dispatcher under test
    pub dispatcher: Dispatcher,
    /// Diagnostics written by the dispatcher
    pub sink: Arc<RecordingSink>,
    /// Status codes delivered to the error handler
    pub statuses: Arc<Mutex<Vec<StatusCode>>>,
    /// Tags of listeners in the order they ran
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl TestEnvironment {
    /// Create a new test environment with default config
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Create a new test environment with the given config
    pub fn with_config(config: DispatcherConfig) -> Self {
        dispatch_hub::logging::try_init_logging();

        let sink = Arc::new(RecordingSink::new());
        let statuses = Arc::new(Mutex::new(Vec::new()));
        let statuses_clone = Arc::clone(&statuses);

        let mut dispatcher = Dispatcher::with_config(config).with_sink(sink.clone());
        dispatcher.catch(move |status| statuses_clone.lock().push(status));

        Self {
            dispatcher,
            sink,
            statuses,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Listener that records `tag` in the call log each time it runs
    pub fn listener(&self, tag: &str) -> Listener {
        let calls = Arc::clone(&self.calls);
        let tag = tag.to_string();
        Listener::new(move || calls.lock().push(tag.clone()))
    }

    /// Calls recorded so far
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Status codes reported so far
    pub fn statuses(&self) -> Vec<StatusCode> {
        self.statuses.lock().clone()
    }
}
