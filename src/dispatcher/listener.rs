//! Listener callbacks and the shared sequences that hold them.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

/// Type for listener IDs
pub type ListenerId = Uuid;

/// A zero-argument callback with a stable identity.
///
/// Cloning a `Listener` keeps its id, so a clone counts as the same listener
/// for duplicate detection and removal. Two listeners built from separate
/// `Listener::new` calls are always distinct, even when they wrap the same
/// function.
#[derive(Clone)]
pub struct Listener {
    id: ListenerId,
    func: Arc<dyn Fn() + Send + Sync>,
}

impl Listener {
    /// Wrap a callback in a new listener
    pub fn new<F>(func: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            func: Arc::new(func),
        }
    }

    /// Get the identity of this listener
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Invoke the callback. Panics propagate to the caller.
    pub fn call(&self) {
        (self.func)()
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

/// The live listener sequence of one event entry.
///
/// Handles returned by [`Dispatcher::listeners`](crate::Dispatcher::listeners)
/// share storage with the entry, so later registrations and removals are
/// visible through them. Only the dispatcher mutates the sequence.
#[derive(Clone, Default)]
pub struct ListenerList {
    inner: Arc<RwLock<Vec<Listener>>>,
}

impl ListenerList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_listener(listener: Listener) -> Self {
        Self {
            inner: Arc::new(RwLock::new(vec![listener])),
        }
    }

    /// Number of listeners in the sequence
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Whether this exact listener (by id) is in the sequence
    pub fn contains(&self, listener: &Listener) -> bool {
        self.inner.read().iter().any(|l| l == listener)
    }

    /// Listener at `index`, in registration order
    pub fn get(&self, index: usize) -> Option<Listener> {
        self.inner.read().get(index).cloned()
    }

    /// Ids of all listeners, in registration order
    pub fn ids(&self) -> Vec<ListenerId> {
        self.inner.read().iter().map(Listener::id).collect()
    }

    /// Copy of the current contents
    pub fn to_vec(&self) -> Vec<Listener> {
        self.inner.read().clone()
    }

    /// Whether two handles point at the same underlying sequence
    pub fn ptr_eq(&self, other: &ListenerList) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Append the listener unless it is already present.
    /// Returns the new length, or `None` when nothing was appended.
    pub(crate) fn push_unique(&self, listener: Listener) -> Option<usize> {
        let mut listeners = self.inner.write();
        if listeners.iter().any(|l| *l == listener) {
            return None;
        }
        listeners.push(listener);
        Some(listeners.len())
    }

    /// Remove the listener in place. Returns false if it was not present.
    pub(crate) fn remove(&self, listener: &Listener) -> bool {
        let mut listeners = self.inner.write();
        match listeners.iter().position(|l| l == listener) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ListenerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.read().iter()).finish()
    }
}
