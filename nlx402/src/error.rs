//! Error types for NLx402 client operations.
//!
//! Every operation of [`PaywallClient`](crate::PaywallClient) fails with a
//! single closed enum, [`Nlx402Error`]. The variants split into two groups:
//!
//! - Local precondition failures ([`Nlx402Error::Configuration`],
//!   [`Nlx402Error::Validation`]) are detected before any request is sent.
//! - Remote failures ([`Nlx402Error::Transport`], [`Nlx402Error::Api`],
//!   [`Nlx402Error::Parse`]) describe what went wrong with the one request
//!   the operation issued.
//!
//! The client never retries; every error reaches the caller unchanged.

use http::StatusCode;
use serde_json::Value;

use crate::transport::TransportError;

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// The body decoded as JSON.
    Json(Value),
    /// The body was not JSON; holds the raw text (possibly empty).
    Text(String),
}

impl ErrorBody {
    /// Decodes a raw response body, preferring JSON.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).map_or_else(
            |_| Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            Self::Json,
        )
    }

    /// Returns the decoded JSON body, if the server sent one.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Errors returned by NLx402 client operations.
#[derive(Debug, thiserror::Error)]
pub enum Nlx402Error {
    /// An authenticated operation was invoked without a usable API key.
    #[error("NLx402: {0}")]
    Configuration(String),

    /// A required caller input (nonce, transaction signature, price) was
    /// missing or not encodable.
    #[error("NLx402: {0}")]
    Validation(String),

    /// The transport could not complete the request.
    #[error("NLx402 transport error: {context}: {source}")]
    Transport {
        /// The request that failed, e.g. `"GET /api/metadata"`.
        context: &'static str,
        /// The underlying transport error.
        #[source]
        source: TransportError,
    },

    /// The facilitator answered with a non-2xx status.
    #[error("NLx402 request failed with status {status}: {context}: {body}")]
    Api {
        /// The request that failed.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The decoded response body.
        body: ErrorBody,
    },

    /// A JSON document could not be decoded (2xx response) or encoded
    /// (verify payload).
    #[error("NLx402 invalid JSON: {context}: {source}")]
    Parse {
        /// What was being decoded or encoded.
        context: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl Nlx402Error {
    /// Error returned when an authenticated operation runs without an API key.
    #[must_use]
    pub fn missing_api_key() -> Self {
        Self::Configuration(
            "API key is required but not set; call set_api_key() or configure one".to_owned(),
        )
    }

    /// Returns the HTTP status of an [`Nlx402Error::Api`] error.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the facilitator answered `402 Payment Required`.
    #[must_use]
    pub fn is_payment_required(&self) -> bool {
        self.status() == Some(StatusCode::PAYMENT_REQUIRED)
    }

    /// Returns `true` if the error was raised locally, before any request was sent.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Validation(_))
    }
}
