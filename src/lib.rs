//! Minimal synchronous publish/subscribe dispatcher.
//!
//! Callers register listeners under a name with [`Dispatcher::on`] or
//! [`Dispatcher::once`] and later run every listener for that name, in
//! registration order, with [`Dispatcher::emit`].
//!
//! ```
//! use dispatch_hub::{Dispatcher, Listener};
//!
//! let mut dispatcher = Dispatcher::new();
//! let ready = Listener::new(|| println!("ready"));
//! dispatcher.on("ready", ready.clone()).emit("ready");
//! dispatcher.remove_listener("ready", &ready);
//! ```

// Export modules
pub mod config;
pub mod diagnostics;
pub mod dispatcher;
pub mod error;
pub mod global;
pub mod logging;

#[cfg(test)]
mod tests;

// Re-export common types for easier access
pub use config::{DispatcherConfig, LogMode};
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use dispatcher::{
    Dispatcher, EntryKind, ErrorHandler, EventEntry, Listener, ListenerId, ListenerList,
};
pub use error::{ConfigError, ConfigResult, StatusCode};
