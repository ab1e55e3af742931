//! Error taxonomy for the dispatch console API client.
//!
//! Every failure surfaced by the HTTP access layer is normalized into one of
//! the [`ApiError`] variants. Resource clients and stores pass these through
//! unchanged, so a caller can always match on the same taxonomy regardless of
//! which operation failed.

use serde_json::Value;
use thiserror::Error;

/// Result type alias for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Normalized request failure.
///
/// Status-bearing variants keep the server-provided detail message and the
/// raw response payload so callers can present or inspect the original body.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The server rejected the session (HTTP 401).
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Detail message extracted from the response body.
        message: String,
        /// Raw response payload, if it was valid JSON.
        raw: Option<Value>,
    },

    /// The session is valid but lacks permission (HTTP 403).
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Detail message extracted from the response body.
        message: String,
        /// Raw response payload, if it was valid JSON.
        raw: Option<Value>,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound {
        /// Detail message extracted from the response body.
        message: String,
        /// Raw response payload, if it was valid JSON.
        raw: Option<Value>,
    },

    /// The server failed to process the request (HTTP 5xx).
    #[error("Server error (status {status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Detail message extracted from the response body.
        message: String,
        /// Raw response payload, if it was valid JSON.
        raw: Option<Value>,
    },

    /// Any other non-2xx response, typically a validation failure (HTTP 4xx).
    #[error("Request rejected (status {status}): {message}")]
    Validation {
        /// HTTP status code.
        status: u16,
        /// Detail message extracted from the response body.
        message: String,
        /// Raw response payload, if it was valid JSON.
        raw: Option<Value>,
    },

    /// The request produced no response at all (connect failure or timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The request could not be set up or its response could not be decoded.
    #[error("Client setup error: {0}")]
    ClientSetup(String),
}

impl ApiError {
    /// Short category label, used for diagnostic logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Server { .. } => "server_error",
            Self::Validation { .. } => "validation",
            Self::Network(_) => "network",
            Self::ClientSetup(_) => "client_setup",
        }
    }

    /// Returns `true` if this error means the session is not authenticated.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns `true` if the request never reached the server.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
