//! Optional process-wide dispatcher.
//!
//! Nothing in the core dispatcher depends on this module. Hosts that want a
//! single shared instance install one here; everyone else holds a
//! [`Dispatcher`] directly.

use std::sync::OnceLock;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::dispatcher::{Dispatcher, EntryKind};

static GLOBAL: OnceLock<Mutex<Dispatcher>> = OnceLock::new();

/// Install `dispatcher` as the global instance if none exists yet.
///
/// Returns true if this call installed it. When a global instance already
/// exists, `dispatcher` is dropped and the existing one is left in place.
pub fn install(dispatcher: Dispatcher) -> bool {
    let mut installed = false;
    GLOBAL.get_or_init(|| {
        installed = true;
        Mutex::new(dispatcher)
    });

    if installed {
        debug!("Installed global dispatcher");
    } else {
        trace!("Global dispatcher already installed");
    }
    installed
}

/// The global instance, if one was installed.
///
/// Do not call `emit` on the locked guard from code that listeners can
/// reach: a listener that locks the global instance while it is dispatching
/// blocks forever. Use [`emit`] instead.
pub fn global() -> Option<&'static Mutex<Dispatcher>> {
    GLOBAL.get()
}

/// The global instance, installing a default dispatcher on first use.
///
/// The same locking rule as [`global`] applies.
pub fn global_or_default() -> &'static Mutex<Dispatcher> {
    GLOBAL.get_or_init(|| Mutex::new(Dispatcher::new()))
}

/// Dispatch `name` on the global instance without holding its lock while
/// listeners run, so listeners may use the global dispatcher themselves.
///
/// Installs a default dispatcher if none exists. The listeners are captured
/// under the lock, and a one-shot entry is removed by name after the last
/// listener returns.
pub fn emit(name: &str) {
    let dispatcher = global_or_default();

    let plan = dispatcher.lock().prepare_dispatch(name);
    let Some(plan) = plan else {
        return;
    };

    for listener in &plan.listeners {
        listener.call();
    }

    if plan.kind == EntryKind::OneShot {
        dispatcher.lock().finish_one_shot(name);
    }
}
