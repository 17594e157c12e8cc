// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Authentication Error Types
 * Production-ready error handling with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Top-level error type for authentication attempts
///
/// HTTP-level outcomes (4xx/5xx status codes, rejected credentials, a login
/// page without the expected token) are returned as data, never as errors.
/// Only configuration problems, sender failures, and unparseable API login
/// responses surface here.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required parameter was absent (or empty) at setup time
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A parameter was present but unusable (e.g. a malformed URL)
    #[error("Invalid value for parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The injected sender failed to complete a request
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API login response body was not valid JSON
    #[error("Malformed login response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

impl AuthError {
    /// Check whether this error was raised before any network call
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AuthError::MissingParameter(_) | AuthError::InvalidParameter { .. }
        )
    }
}

/// Sender-level failures: the request never produced a response
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Invalid request URL: {url}")]
    InvalidUrl { url: String },

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Check if the failure is worth retrying
    ///
    /// The authenticators never retry on their own; this classification is
    /// for callers that wrap authentication in a retry policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout { .. } => true,
            TransportError::ConnectionFailed { .. } => true,
            TransportError::InvalidUrl { .. } => false,
            TransportError::Other(_) => false,
        }
    }
}

/// Convert reqwest errors from the bundled sender into transport errors
impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();

        if err.is_timeout() {
            TransportError::Timeout { url }
        } else if err.is_connect() {
            TransportError::ConnectionFailed {
                url,
                reason: err.to_string(),
            }
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
