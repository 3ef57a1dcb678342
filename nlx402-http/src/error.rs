//! Error types for the reqwest transport.

use nlx402::Nlx402Error;

/// Errors raised while performing a request with `reqwest`.
///
/// Surfaced to callers as the `source` of [`Nlx402Error::Transport`].
#[derive(Debug, thiserror::Error)]
pub enum ReqwestTransportError {
    /// The [`http::Request`] could not be converted into a reqwest request.
    #[error("failed to build request: {0}")]
    Build(#[source] reqwest::Error),

    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Send(#[source] reqwest::Error),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// A middleware in the client stack failed.
    #[cfg(feature = "middleware")]
    #[error("middleware error: {0}")]
    Middleware(#[source] reqwest_middleware::Error),
}

impl ReqwestTransportError {
    /// Returns the underlying reqwest error, if there is one.
    #[must_use]
    pub fn reqwest(&self) -> Option<&reqwest::Error> {
        match self {
            Self::Build(e) | Self::Send(e) | Self::Body(e) => Some(e),
            #[cfg(feature = "middleware")]
            Self::Middleware(reqwest_middleware::Error::Reqwest(e)) => Some(e),
            #[cfg(feature = "middleware")]
            Self::Middleware(_) => None,
        }
    }
}

/// Returns `true` if `err` is a transport failure caused by a reqwest timeout.
#[must_use]
pub fn is_timeout(err: &Nlx402Error) -> bool {
    match err {
        Nlx402Error::Transport { source, .. } => source
            .downcast_ref::<ReqwestTransportError>()
            .and_then(ReqwestTransportError::reqwest)
            .is_some_and(reqwest::Error::is_timeout),
        _ => false,
    }
}
