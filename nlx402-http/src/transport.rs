//! [`HttpTransport`] implementations backed by `reqwest`.
//!
//! Every implementation performs exactly one round trip: the
//! [`http::Request`] built by [`nlx402::PaywallClient`] is converted into a
//! [`reqwest::Request`], executed, and the response is read in full.
//! Non-2xx responses are returned as-is; retries, if wanted, belong in a
//! `reqwest_middleware` stack supplied by the caller.

use std::time::Duration;

use nlx402::transport::{BoxFuture, HttpTransport, TransportError};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ReqwestTransportError;

/// A [`reqwest::Client`] with an optional per-request timeout.
///
/// Without a timeout, the client's own defaults apply.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Creates a transport with a default [`reqwest::Client`] and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport around a pre-configured [`reqwest::Client`].
    #[must_use]
    pub fn with_http_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Sets a timeout applied to every request.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the underlying reqwest client.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Returns the configured timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>> {
        Box::pin(async move {
            let request = into_reqwest(request, self.timeout)?;
            execute(&self.client, request).await.map_err(Into::into)
        })
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self::with_http_client(client)
    }
}

/// A `reqwest_middleware` client stack used as a transport.
///
/// Use this to add retries, caching or request logging around NLx402
/// calls; the SDK itself sends each request once.
#[cfg(feature = "middleware")]
#[derive(Debug, Clone)]
pub struct MiddlewareTransport {
    client: reqwest_middleware::ClientWithMiddleware,
}

#[cfg(feature = "middleware")]
impl MiddlewareTransport {
    /// Wraps a middleware client stack.
    #[must_use]
    pub const fn new(client: reqwest_middleware::ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Returns the wrapped middleware client.
    #[must_use]
    pub const fn client(&self) -> &reqwest_middleware::ClientWithMiddleware {
        &self.client
    }
}

#[cfg(feature = "middleware")]
impl From<reqwest_middleware::ClientWithMiddleware> for MiddlewareTransport {
    fn from(client: reqwest_middleware::ClientWithMiddleware) -> Self {
        Self::new(client)
    }
}

#[cfg(feature = "middleware")]
impl HttpTransport for MiddlewareTransport {
    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>> {
        Box::pin(async move {
            let request = into_reqwest(request, None)?;
            let response = self
                .client
                .execute(request)
                .await
                .map_err(ReqwestTransportError::Middleware)?;
            read_response(response).await.map_err(Into::into)
        })
    }
}

fn into_reqwest(
    request: http::Request<Vec<u8>>,
    timeout: Option<Duration>,
) -> Result<reqwest::Request, ReqwestTransportError> {
    let mut request = reqwest::Request::try_from(request).map_err(ReqwestTransportError::Build)?;
    if timeout.is_some() {
        *request.timeout_mut() = timeout;
    }
    Ok(request)
}

/// Executes one request and reads the full response.
#[cfg_attr(
    feature = "telemetry",
    instrument(
        name = "nlx402.http.execute",
        skip_all,
        fields(method = %request.method(), url = %request.url()),
        err
    )
)]
async fn execute(
    client: &reqwest::Client,
    request: reqwest::Request,
) -> Result<http::Response<Vec<u8>>, ReqwestTransportError> {
    let response = client
        .execute(request)
        .await
        .map_err(ReqwestTransportError::Send)?;
    read_response(response).await
}

async fn read_response(
    response: reqwest::Response,
) -> Result<http::Response<Vec<u8>>, ReqwestTransportError> {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .bytes()
        .await
        .map_err(ReqwestTransportError::Body)?;

    #[cfg(feature = "telemetry")]
    tracing::trace!(status = %status, bytes = body.len(), "Received NLx402 response");

    let mut out = http::Response::new(body.to_vec());
    *out.status_mut() = status;
    *out.headers_mut() = headers;
    Ok(out)
}
