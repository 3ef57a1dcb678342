#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Reqwest transport for the NLx402 client SDK.
//!
//! [`nlx402::PaywallClient`] is transport-agnostic; this crate plugs it into
//! `reqwest` through two [`nlx402::HttpTransport`] implementations:
//!
//! - [`ReqwestTransport`] — a `reqwest::Client` with an optional per-request timeout
//! - `MiddlewareTransport` — a `reqwest_middleware::ClientWithMiddleware` stack
//!   (feature: `middleware`)
//!
//! # Example
//!
//! ```no_run
//! use nlx402::ClientConfig;
//!
//! # async fn run() -> Result<(), nlx402::Nlx402Error> {
//! let client = nlx402_http::build_client(ClientConfig::new().with_api_key("sk_live"));
//! let metadata = client.get_metadata().await?;
//! println!("facilitator on {}", metadata.metadata.network);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`error`] — Transport error types
//! - [`transport`] — [`HttpTransport`](nlx402::HttpTransport) implementations
//!
//! # Feature Flags
//!
//! - `middleware` - Enables `MiddlewareTransport`
//! - `telemetry` - Enables tracing instrumentation (also in `nlx402`)

pub mod error;
pub mod transport;

pub use error::{ReqwestTransportError, is_timeout};
pub use transport::ReqwestTransport;
#[cfg(feature = "middleware")]
pub use transport::MiddlewareTransport;

use nlx402::{ClientConfig, PaywallClient};

/// A [`PaywallClient`] backed by [`ReqwestTransport`].
pub type Nlx402Client = PaywallClient<ReqwestTransport>;

/// Creates a client for `config` with a default [`ReqwestTransport`].
#[must_use]
pub fn build_client(config: ClientConfig) -> Nlx402Client {
    PaywallClient::new(config, ReqwestTransport::new())
}

/// Creates a client configured from `NLX402_BASE_URL` and `NLX402_API_KEY`.
#[must_use]
pub fn client_from_env() -> Nlx402Client {
    build_client(ClientConfig::from_env())
}
