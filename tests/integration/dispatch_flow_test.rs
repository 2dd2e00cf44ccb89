//! Integration tests for end-to-end dispatch flows
use anyhow::Result;

use crate::test_harness::TestEnvironment;
use dispatch_hub::{Diagnostic, DispatcherConfig, EntryKind, LogMode, StatusCode};

/// `on` then `emit` runs the listener once and chains back to the dispatcher
#[test]
fn test_ready_flow() -> Result<()> {
    let mut env = TestEnvironment::new();
    let f = env.listener("f");

    let names = env.dispatcher.on("ready", f).emit("ready").event_names().len();

    assert_eq!(names, 1);
    assert_eq!(env.calls(), vec!["f"]);
    assert!(env.statuses().is_empty());
    Ok(())
}

/// `once` then two `emit`s: one call, then NotFound through both channels
#[test]
fn test_boot_flow() -> Result<()> {
    let mut env = TestEnvironment::new();
    let g = env.listener("g");

    env.dispatcher.once("boot", g);
    assert_eq!(
        env.dispatcher.entry("boot").map(|e| e.kind()),
        Some(EntryKind::OneShot)
    );

    env.dispatcher.emit("boot").emit("boot");

    assert_eq!(env.calls(), vec!["g"]);
    assert_eq!(env.statuses(), vec![StatusCode::NotFound]);
    assert_eq!(
        env.sink.records(),
        vec![Diagnostic::NotFound {
            name: "boot".to_string()
        }]
    );
    Ok(())
}

/// Several events with mixed registrations and removals
#[test]
fn test_mixed_lifecycle() -> Result<()> {
    let mut env = TestEnvironment::new();
    let a = env.listener("a");
    let b = env.listener("b");
    let c = env.listener("c");

    env.dispatcher
        .on("left", a.clone())
        .on("left", b.clone())
        .on("right", c.clone())
        .remove_listener("left", &a)
        .emit("left")
        .emit("right")
        .remove_all_listeners(&[])
        .emit("left")
        .emit("right");

    assert_eq!(env.calls(), vec!["b", "c"]);
    assert_eq!(
        env.statuses(),
        vec![StatusCode::NoListeners, StatusCode::NoListeners]
    );
    assert_eq!(env.dispatcher.event_names(), vec!["left", "right"]);

    // Re-registering after a clear reuses the entry
    env.dispatcher.on("left", a).emit("left");
    assert_eq!(env.calls(), vec!["b", "c", "a"]);
    Ok(())
}

/// The listener past the cap is kept and runs
#[test]
fn test_over_cap_listener_still_runs() -> Result<()> {
    let config = DispatcherConfig::from_json(r#"{"max_listeners": 2}"#)?;
    let mut env = TestEnvironment::with_config(config);

    for tag in ["one", "two", "three", "four"] {
        let listener = env.listener(tag);
        env.dispatcher.on("busy", listener);
    }
    env.dispatcher.emit("busy");

    assert_eq!(env.calls(), vec!["one", "two", "three", "four"]);
    // Warned for the third and the fourth listener
    assert_eq!(env.sink.records().len(), 2);
    Ok(())
}

/// Silent mode keeps the error handler channel but drops diagnostics
#[test]
fn test_silent_mode_channels() -> Result<()> {
    let mut env = TestEnvironment::with_config(DispatcherConfig {
        mode: LogMode::Silent,
        ..DispatcherConfig::default()
    });

    env.dispatcher.emit("missing");

    assert_eq!(env.statuses(), vec![StatusCode::NotFound]);
    assert!(env.sink.records().is_empty());
    Ok(())
}

/// A view taken before removal reflects the removal
#[test]
fn test_listener_view_aliases_entry() -> Result<()> {
    let mut env = TestEnvironment::new();
    let a = env.listener("a");
    let b = env.listener("b");

    env.dispatcher.on("ready", a.clone()).on("ready", b.clone());
    let view = env
        .dispatcher
        .listeners("ready")
        .ok_or_else(|| anyhow::anyhow!("ready should be registered"))?;
    assert_eq!(view.len(), 2);

    env.dispatcher.remove_listener("ready", &b);
    assert_eq!(view.len(), 1);
    assert!(view.contains(&a));
    assert!(!view.contains(&b));

    assert!(env.dispatcher.listeners("missing").is_none());
    assert_eq!(env.statuses(), vec![StatusCode::NoListeners]);
    Ok(())
}
