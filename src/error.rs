use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status codes delivered to the dispatcher's error handler.
///
/// These never surface as `Err` values from dispatcher operations. They flow
/// exclusively through the callback installed with
/// [`Dispatcher::catch`](crate::Dispatcher::catch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// No entry is registered under the requested name
    NotFound,

    /// The entry exists but has no listeners, or the listener lookup failed
    NoListeners,
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::NotFound => write!(f, "event is not registered (404)"),
            StatusCode::NoListeners => write!(f, "event has no matching listeners (405)"),
        }
    }
}

impl StatusCode {
    /// Numeric form of the status code
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::NotFound => 404,
            StatusCode::NoListeners => 405,
        }
    }

    /// Map a numeric code back to a status, if it is one we emit
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            404 => Some(StatusCode::NotFound),
            405 => Some(StatusCode::NoListeners),
            _ => None,
        }
    }
}

/// Errors raised while building a dispatcher configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value '{value}' for '{key}': {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::Invalid {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
