use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

// Default configuration values
const DEFAULT_MAX_LISTENERS: usize = 5;

/// Environment key selecting the log mode
pub const ENV_LOG_MODE: &str = "DISPATCH_LOG_MODE";
/// Environment key for the per-event listener cap
pub const ENV_MAX_LISTENERS: &str = "DISPATCH_MAX_LISTENERS";

/// Whether the dispatcher writes diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogMode {
    #[default]
    Verbose,
    Silent,
}

impl LogMode {
    /// Interpret a construction flag. Only the literal `"silent"` turns
    /// logging off; any other value keeps it on.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "silent" {
            LogMode::Silent
        } else {
            LogMode::Verbose
        }
    }

    pub fn logging_enabled(&self) -> bool {
        matches!(self, LogMode::Verbose)
    }
}

/// Construction options for a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Diagnostic mode, fixed for the dispatcher's lifetime
    #[serde(default)]
    pub mode: LogMode,
    /// Advisory listener cap per event
    #[serde(default = "default_max_listeners")]
    pub max_listeners: usize,
}

fn default_max_listeners() -> usize {
    DEFAULT_MAX_LISTENERS
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::default(),
            max_listeners: default_max_listeners(),
        }
    }
}

impl DispatcherConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Read the config from the process environment, loading `.env` first
    /// if one exists
    pub fn from_env() -> ConfigResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded environment file"),
            Err(_) => debug!("No .env file found. Using existing environment variables."),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup(ENV_LOG_MODE) {
            config.mode = LogMode::from_flag(mode.trim());
        }

        if let Some(raw) = lookup(ENV_MAX_LISTENERS) {
            config.max_listeners = raw.trim().parse().map_err(|e| {
                ConfigError::invalid(ENV_MAX_LISTENERS, raw.clone(), format!("{}", e))
            })?;
        }

        Ok(config)
    }
}
