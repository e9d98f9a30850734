//! Error types for backend client operations.
//!
//! Maps every outcome of a backend HTTP call to a small taxonomy so callers
//! can distinguish authentication failure, malformed server responses, and
//! generic transport failure.

use thiserror::Error;

/// Errors raised by [`BrowserlessClient`](crate::client::BrowserlessClient)
/// operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The caller supplied an inconsistent or incomplete request or
    /// configuration. Raised before any network call; never retried.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What was wrong with the request.
        reason: String,
    },

    /// The backend returned HTTP 403.
    ///
    /// Never retried automatically; surfaced distinctly so callers can
    /// trigger re-authentication flows.
    #[error("authentication failure (HTTP 403) calling {url}")]
    AuthFailure {
        /// The URL that was rejected.
        url: String,
    },

    /// A well-formed HTTP response whose body or status does not match the
    /// expected shape (e.g. an upload response that is not an array, or an
    /// unexpected status on delete).
    #[error("bad backend response: {detail}")]
    BadResponse {
        /// What the response looked like versus what was expected.
        detail: String,
    },

    /// HTTP error status outside the cases classified above.
    #[error("HTTP {status} calling {url}")]
    HttpStatus {
        /// The URL that returned the error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Request deadline exceeded.
    #[error("timeout calling {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Failure below the HTTP layer (DNS, connection refused, TLS, ...).
    #[error("network error calling {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// Creates a validation error raised before any network call.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates an authentication failure for a 403 response.
    pub fn auth_failure(url: impl Into<String>) -> Self {
        Self::AuthFailure { url: url.into() }
    }

    /// Creates a malformed-response error.
    pub fn bad_response(detail: impl Into<String>) -> Self {
        Self::BadResponse {
            detail: detail.into(),
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }
}

// No `From<reqwest::Error>` impl: the variants require context (the URL
// being called) that the source error does not carry. The helper
// constructors are the supported construction path.
