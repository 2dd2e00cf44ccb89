//! Diagnostic output for the dispatcher.
//!
//! Diagnostics are one-way notifications and never an error path. The
//! dispatcher only calls the sink when logging is enabled.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Destination for dispatcher diagnostics
pub trait DiagnosticSink: Send + Sync {
    /// `emit` was called for a name with no entry
    fn not_found(&self, name: &str);

    /// A registration pushed an entry past the listener cap
    fn max_limit(&self, name: &str, cap: usize);
}

/// Default sink, writes diagnostics through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn not_found(&self, name: &str) {
        error!(event = %name, code = 404, "Event '{}' is not registered", name);
    }

    fn max_limit(&self, name: &str, cap: usize) {
        warn!(
            event = %name,
            cap,
            "Listeners of event '{}' go beyond the maximum limit {}",
            name,
            cap
        );
    }
}

/// A single recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    NotFound { name: String },
    MaxLimit { name: String, cap: usize },
}

/// In-memory sink for tests. Keeps every diagnostic in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().clone()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn not_found(&self, name: &str) {
        self.records.lock().push(Diagnostic::NotFound {
            name: name.to_string(),
        });
    }

    fn max_limit(&self, name: &str, cap: usize) {
        self.records.lock().push(Diagnostic::MaxLimit {
            name: name.to_string(),
            cap,
        });
    }
}
