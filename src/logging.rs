use anyhow::{anyhow, Result};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when RUST_LOG is not set
pub const DEFAULT_FILTER: &str = "dispatch_hub=info,warn";

/// Install a global tracing subscriber for host applications and tests.
///
/// Honors RUST_LOG and falls back to [`DEFAULT_FILTER`]. Fails if another
/// subscriber is already installed.
pub fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    debug!("Logging initialized. Set RUST_LOG environment variable to control log levels");
    Ok(())
}

/// Like [`init_logging`], but a subscriber that is already installed is not
/// an error. Meant for tests, which may race to initialize.
pub fn try_init_logging() {
    let _ = init_logging();
}
