use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Every failure a resource or edit buffer can record.
///
/// Errors are values: they are stored on the owning resource or edit
/// session and rendered by the view, never thrown across views.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No credential could be obtained; the call never reached the network.
    #[error("Please log in again.")]
    Unauthorized,
    /// The server answered with a non-2xx status.
    #[error("Unexpected response from server: {name}")]
    UnexpectedResponse {
        /// Status line, e.g. `404 Not Found`.
        name: String,
        /// The `details` object of a JSON error body, empty otherwise.
        details: Map<String, Value>,
    },
    /// The request itself failed (DNS, refused connection, timeout, ...).
    #[error("{kind}: {message}")]
    Transport { kind: TransportKind, message: String },
    /// A local pre-submission check failed; nothing was sent.
    #[error("{message}")]
    Validation { field: String, message: String },
    /// A 2xx response whose body was not the expected JSON.
    #[error("could not decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Timeout,
    Connect,
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Connect => write!(f, "connection error"),
            TransportKind::Other => write!(f, "network error"),
        }
    }
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        ApiError::Transport {
            kind,
            message: message.into(),
        }
    }

    /// Short identifying label shown as the error heading in views.
    pub fn name(&self) -> String {
        match self {
            ApiError::Unauthorized => "Login Error".to_string(),
            ApiError::UnexpectedResponse { name, .. } => name.clone(),
            ApiError::Transport { .. } => "Connection Error".to_string(),
            ApiError::Validation { .. } => "Validation Error".to_string(),
            ApiError::Decode(_) => "Decode Error".to_string(),
        }
    }

    pub fn details(&self) -> Option<&Map<String, Value>> {
        match self {
            ApiError::UnexpectedResponse { details, .. } => Some(details),
            _ => None,
        }
    }

    /// HTTP status code for unexpected responses.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedResponse { name, .. } => {
                name.split_whitespace().next().and_then(|code| code.parse().ok())
            }
            _ => None,
        }
    }
}
