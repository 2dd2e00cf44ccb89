use std::fmt;

use serde::{Deserialize, Serialize};

use super::listener::{Listener, ListenerList};

/// Whether an entry survives dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Created by `on`; stays registered across dispatches
    Persistent,
    /// Created by `once`; dropped right after its first dispatch
    OneShot,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Persistent => write!(f, "persistent"),
            EntryKind::OneShot => write!(f, "one_shot"),
        }
    }
}

/// Subscription state for one named event.
///
/// The kind is fixed by whichever registration created the entry.
#[derive(Debug, Clone)]
pub struct EventEntry {
    name: String,
    pub(crate) listeners: ListenerList,
    kind: EntryKind,
}

impl EventEntry {
    pub(crate) fn new(name: &str, listener: Listener, kind: EntryKind) -> Self {
        Self {
            name: name.to_string(),
            listeners: ListenerList::with_listener(listener),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Live handle to this entry's listeners
    pub fn listeners(&self) -> ListenerList {
        self.listeners.clone()
    }

    pub fn contains(&self, listener: &Listener) -> bool {
        self.listeners.contains(listener)
    }

    /// Swap in a fresh, empty listener sequence.
    /// Handles taken earlier keep the detached contents.
    pub(crate) fn clear(&mut self) {
        self.listeners = ListenerList::new();
    }
}
