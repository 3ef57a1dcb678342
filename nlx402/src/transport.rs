//! The HTTP transport abstraction.
//!
//! [`PaywallClient`](crate::PaywallClient) never talks to the network
//! itself. It builds complete [`http::Request`] values (URL, headers and an
//! already-encoded body) and passes them to an [`HttpTransport`], which
//! performs exactly one round trip and returns the raw response.
//!
//! Implement this trait to plug in any HTTP stack. The `nlx402-http` crate
//! implements it for `reqwest`.
//!
//! # Examples
//!
//! ```rust
//! use nlx402::transport::{BoxFuture, HttpTransport, TransportError};
//!
//! /// Answers every request with an empty JSON object.
//! struct Canned;
//!
//! impl HttpTransport for Canned {
//!     fn send(
//!         &self,
//!         _request: http::Request<Vec<u8>>,
//!     ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>> {
//!         Box::pin(async move { Ok(http::Response::new(b"{}".to_vec())) })
//!     }
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A boxed, `Send` future borrowed for `'a`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error produced by a transport that could not complete a request.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Performs a single HTTP round trip.
///
/// Implementations must not retry on their own account and must return
/// non-2xx responses as `Ok`; status classification is the client's job.
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the full response with its body read.
    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>> {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>> {
        (**self).send(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn send(
        &self,
        request: http::Request<Vec<u8>>,
    ) -> BoxFuture<'_, Result<http::Response<Vec<u8>>, TransportError>> {
        (**self).send(request)
    }
}
