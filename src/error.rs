//! Error types for presence operations

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PresenceError {
    /// A value outside its allowed set. Raised before any request is sent.
    #[error("Invalid {field} {value:?}, allowed: {allowed}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("{0}")]
    InvalidState(&'static str),

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Response status outside the range the endpoint accepts.
    #[error("HTTP {status} for {url}: {body}")]
    Upstream {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PresenceError {
    pub(crate) fn invalid_argument(
        field: &'static str,
        value: impl Into<String>,
        allowed: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            field,
            value: value.into(),
            allowed: allowed.into(),
        }
    }

    /// HTTP status carried by an upstream rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PresenceError>;
