//! Crate-level error types.
//!
//! [`ImsError`] unifies every error source (configuration, HTTP transport,
//! server rejections, JSON, draft validation) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.

use reqwest::StatusCode;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImsError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum ImsError {
    /// A configuration value was missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced a response (connect, timeout).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// `message` holds the `message` field of the JSON error body, if the
    /// server supplied one.
    #[error("Request failed with status code {}", .status.as_u16())]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A form draft was rejected before any request was sent.
    #[error("{0}")]
    Validation(&'static str),

    /// Terminal I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

impl ImsError {
    /// Returns the message the server attached to a rejected request.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ImsError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns the text shown to the user for a failed operation.
    ///
    /// The server-provided message wins over the transport description.
    pub fn detail(&self) -> String {
        match self.server_message() {
            Some(message) => message.to_string(),
            None => self.to_string(),
        }
    }
}
