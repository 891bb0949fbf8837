// SPDX-FileCopyrightText: 2026 zte-sms Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the zte-sms bridge.

use thiserror::Error;

/// The primary error type shared by the router session, the notifier and the
/// polling pipeline.
#[derive(Debug, Error)]
pub enum ZteSmsError {
    /// Configuration errors (missing password, no notifier keys, bad URLs).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network failure, timeout, or a non-2xx HTTP status.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The response body did not have the shape the endpoint promises.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// A required field was absent from an otherwise well-formed response.
    #[error("response from {endpoint} is missing required field `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    /// The router refused the login digest.
    #[error("router rejected login (result code {code})")]
    Authentication { code: i64 },

    /// The liveness probe reported anything other than `ok`.
    #[error("router session expired (loginfo={status:?})")]
    SessionExpired { status: String },

    /// A mutating call was attempted before an authorization token existed.
    #[error("{operation} requires an authorization token; log in first")]
    NotAuthorized { operation: &'static str },

    /// The router answered a mutating call with something other than success.
    #[error("router rejected {operation}: {result}")]
    Rejected {
        operation: &'static str,
        result: String,
    },

    /// Push notification delivery failed.
    #[error("notification failed: {message}")]
    Notify {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ZteSmsError {
    /// Build a [`ZteSmsError::Transport`] from any underlying error.
    pub fn transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a [`ZteSmsError::Protocol`] with a message.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// True for response-shape errors, including missing required fields.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. } | Self::MissingField { .. })
    }

    /// True for network level failures (including timeouts).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
