//! The NLx402 protocol client.
//!
//! [`PaywallClient`] performs the five request shapes of the NLx402 API
//! against a single facilitator. It owns a [`ClientConfig`] and an
//! [`HttpTransport`]; it keeps no other state between calls.
//!
//! Each operation:
//!
//! 1. checks its local preconditions (API key, nonce, transaction) and
//!    fails before touching the transport if one is not met,
//! 2. builds one [`http::Request`] and sends it through the transport,
//! 3. treats any 2xx status as success and decodes the JSON body.
//!
//! There is no retry, no backoff and no implicit ordering between calls.
//! The facilitator drives the `quoted -> verified -> paid` lifecycle of a
//! nonce; [`PaywallClient::get_and_verify_quote`] merely chains the first
//! two steps.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut client = PaywallClient::new(ClientConfig::from_env(), transport);
//! let QuoteAndVerify { quote, .. } = client.get_and_verify_quote(Some(TotalPrice::from(0.002))).await?;
//! let tx = pay_on_chain(&quote).await?;
//! let paid = client.get_paid_access(&tx, &quote.nonce).await?;
//! assert!(paid.matches_quote(&quote));
//! ```

use http::header::CONTENT_TYPE;
use http::{HeaderName, HeaderValue, Method, Request};
use serde::de::DeserializeOwned;
use std::fmt::Display;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::{ClientConfig, normalize_base_url};
use crate::constants::{
    API_KEY_HEADER, AUTH_ME_PATH, FORM_CONTENT_TYPE, METADATA_PATH, NONCE_FIELD,
    PAYMENT_DATA_FIELD, PAYMENT_HEADER, PROTECTED_PATH, TOTAL_PRICE_HEADER, VERIFY_PATH,
};
use crate::error::{ErrorBody, Nlx402Error};
use crate::proto::{
    AuthIdentity, FacilitatorMetadata, PaidAccess, PaymentProof, Quote, QuoteAndVerify,
    TotalPrice, VerifyResult,
};
use crate::transport::HttpTransport;

/// A client for one NLx402 facilitator.
#[derive(Debug, Clone)]
pub struct PaywallClient<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> PaywallClient<T> {
    /// Creates a client from a configuration and a transport.
    #[must_use]
    pub fn new(config: ClientConfig, transport: T) -> Self {
        let base_url = normalize_base_url(config.base_url());
        Self {
            config: config.with_base_url(base_url),
            transport,
        }
    }

    /// Sets or replaces the API key used by authenticated operations.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.set_api_key(api_key.into());
    }

    /// Returns the API key, if one is set.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.config.api_key()
    }

    /// Returns the normalized facilitator base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    /// Returns the `x-api-key` header value, or fails if no key is set.
    fn api_key_header(&self) -> Result<HeaderValue, Nlx402Error> {
        let api_key = self
            .config
            .api_key()
            .filter(|key| !key.is_empty())
            .ok_or_else(Nlx402Error::missing_api_key)?;
        HeaderValue::from_str(api_key).map_err(|_| {
            Nlx402Error::Configuration("API key contains characters not allowed in a header".into())
        })
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        headers: Vec<(HeaderName, HeaderValue)>,
        body: Vec<u8>,
    ) -> Result<Request<Vec<u8>>, Nlx402Error> {
        let mut builder = Request::builder().method(method).uri(self.url(path));
        for (name, value) in headers {
            builder = builder.header(name, value);
        }
        builder
            .body(body)
            .map_err(|e| Nlx402Error::Configuration(format!("invalid request to {path}: {e}")))
    }
}

impl<T: HttpTransport> PaywallClient<T> {
    /// Fetches public facilitator metadata (`GET /api/metadata`).
    ///
    /// # Errors
    ///
    /// Returns [`Nlx402Error::Transport`], [`Nlx402Error::Api`] or
    /// [`Nlx402Error::Parse`] if the request fails.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.get_metadata", skip_all, err)
    )]
    pub async fn get_metadata(&self) -> Result<FacilitatorMetadata, Nlx402Error> {
        let request = self.build(Method::GET, METADATA_PATH, Vec::new(), Vec::new())?;
        self.execute("GET /api/metadata", request).await
    }

    /// Introspects the configured API key (`GET /api/auth/me`).
    ///
    /// # Errors
    ///
    /// Returns [`Nlx402Error::Configuration`] without sending anything if no
    /// API key is set, otherwise any request failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.get_auth_me", skip_all, err)
    )]
    pub async fn get_auth_me(&self) -> Result<AuthIdentity, Nlx402Error> {
        let api_key = self.api_key_header()?;
        let request = self.build(
            Method::GET,
            AUTH_ME_PATH,
            vec![(HeaderName::from_static(API_KEY_HEADER), api_key)],
            Vec::new(),
        )?;
        self.execute("GET /api/auth/me", request).await
    }

    /// Requests a quote for the protected resource (`GET /protected`).
    ///
    /// `x-total-price` is always sent; `None` sends the default of `0.5`.
    ///
    /// # Errors
    ///
    /// Returns [`Nlx402Error::Configuration`] if no API key is set,
    /// [`Nlx402Error::Validation`] for a blank, padded or non-finite price, otherwise
    /// any request failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.get_quote", skip_all, err)
    )]
    pub async fn get_quote(&self, total_price: Option<TotalPrice>) -> Result<Quote, Nlx402Error> {
        let api_key = self.api_key_header()?;
        let total_price = total_price.unwrap_or_default();
        let total_price = header_value(total_price.validate()?, "get_quote: total price")?;
        let request = self.build(
            Method::GET,
            PROTECTED_PATH,
            vec![
                (HeaderName::from_static(API_KEY_HEADER), api_key),
                (HeaderName::from_static(TOTAL_PRICE_HEADER), total_price),
            ],
            Vec::new(),
        )?;
        self.execute("GET /protected (quote)", request).await
    }

    /// Asks the facilitator to verify and lock `quote` (`POST /verify`).
    ///
    /// The quote is sent as compact JSON in the `payment_data` form field,
    /// next to `nonce`.
    ///
    /// # Errors
    ///
    /// Returns [`Nlx402Error::Configuration`] if no API key is set,
    /// [`Nlx402Error::Validation`] if `nonce` is empty, otherwise any request
    /// failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.verify_quote", skip_all, err)
    )]
    pub async fn verify_quote(
        &self,
        quote: &Quote,
        nonce: &str,
    ) -> Result<VerifyResult, Nlx402Error> {
        let api_key = self.api_key_header()?;
        require("verify_quote", "nonce", nonce)?;
        let payment_data = quote.to_payment_data().map_err(|source| Nlx402Error::Parse {
            context: "encode payment_data",
            source,
        })?;
        self.post_verify(api_key, &payment_data, nonce).await
    }

    /// Like [`verify_quote`](Self::verify_quote), but sends `quote_json`
    /// verbatim as `payment_data`.
    ///
    /// # Errors
    ///
    /// Same as [`verify_quote`](Self::verify_quote).
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.verify_quote_raw", skip_all, err)
    )]
    pub async fn verify_quote_raw(
        &self,
        quote_json: &str,
        nonce: &str,
    ) -> Result<VerifyResult, Nlx402Error> {
        let api_key = self.api_key_header()?;
        require("verify_quote_raw", "nonce", nonce)?;
        self.post_verify(api_key, quote_json, nonce).await
    }

    /// Redeems an on-chain payment for the protected resource
    /// (`GET /protected` with `x-payment`).
    ///
    /// # Errors
    ///
    /// Returns [`Nlx402Error::Configuration`] if no API key is set,
    /// [`Nlx402Error::Validation`] if `tx` or `nonce` is empty, otherwise any
    /// request failure.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.get_paid_access", skip_all, err)
    )]
    pub async fn get_paid_access(&self, tx: &str, nonce: &str) -> Result<PaidAccess, Nlx402Error> {
        let api_key = self.api_key_header()?;
        require("get_paid_access", "tx", tx)?;
        require("get_paid_access", "nonce", nonce)?;
        let proof = PaymentProof { tx, nonce }
            .to_header_value()
            .map_err(|source| Nlx402Error::Parse {
                context: "encode x-payment",
                source,
            })?;
        let proof = header_value(&proof, "get_paid_access: x-payment")?;
        let request = self.build(
            Method::GET,
            PROTECTED_PATH,
            vec![
                (HeaderName::from_static(API_KEY_HEADER), api_key),
                (HeaderName::from_static(PAYMENT_HEADER), proof),
            ],
            Vec::new(),
        )?;
        self.execute("GET /protected (paid)", request).await
    }

    /// Requests a quote and immediately verifies it with the quote's nonce.
    ///
    /// The caller still has to pay on-chain and call
    /// [`get_paid_access`](Self::get_paid_access). If the quote request
    /// fails, verification is not attempted and the error is returned as is.
    ///
    /// # Errors
    ///
    /// Any error of [`get_quote`](Self::get_quote) or
    /// [`verify_quote`](Self::verify_quote), plus
    /// [`Nlx402Error::Validation`] if the quote carries no nonce.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "nlx402.client.get_and_verify_quote", skip_all, err)
    )]
    pub async fn get_and_verify_quote(
        &self,
        total_price: Option<TotalPrice>,
    ) -> Result<QuoteAndVerify, Nlx402Error> {
        let quote = self.get_quote(total_price).await?;
        if quote.nonce.is_empty() {
            return Err(Nlx402Error::Validation(
                "get_and_verify_quote: quote did not contain a nonce".to_owned(),
            ));
        }
        let verify = self.verify_quote(&quote, &quote.nonce).await?;
        Ok(QuoteAndVerify { quote, verify })
    }

    async fn post_verify(
        &self,
        api_key: HeaderValue,
        payment_data: &str,
        nonce: &str,
    ) -> Result<VerifyResult, Nlx402Error> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair(PAYMENT_DATA_FIELD, payment_data)
            .append_pair(NONCE_FIELD, nonce)
            .finish();
        let request = self.build(
            Method::POST,
            VERIFY_PATH,
            vec![
                (HeaderName::from_static(API_KEY_HEADER), api_key),
                (CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE)),
            ],
            body.into_bytes(),
        )?;
        self.execute("POST /verify", request).await
    }

    /// Sends one request and classifies the response.
    ///
    /// `context` names the request in errors and traces (e.g. `"POST /verify"`).
    async fn execute<R>(
        &self,
        context: &'static str,
        request: Request<Vec<u8>>,
    ) -> Result<R, Nlx402Error>
    where
        R: DeserializeOwned,
    {
        #[cfg(feature = "telemetry")]
        tracing::debug!(method = %request.method(), uri = %request.uri(), "Sending NLx402 request");

        let result = match self.transport.send(request).await {
            Err(source) => Err(Nlx402Error::Transport { context, source }),
            Ok(response) => {
                let status = response.status();
                let body = response.into_body();
                if status.is_success() {
                    serde_json::from_slice::<R>(&body)
                        .map_err(|source| Nlx402Error::Parse { context, source })
                } else {
                    Err(Nlx402Error::Api {
                        context,
                        status,
                        body: ErrorBody::from_bytes(&body),
                    })
                }
            }
        };

        record_result_on_span(&result);

        result
    }
}

fn require(operation: &str, field: &str, value: &str) -> Result<(), Nlx402Error> {
    if value.is_empty() {
        return Err(Nlx402Error::Validation(format!(
            "{operation}: \"{field}\" is required"
        )));
    }
    Ok(())
}

fn header_value(value: &str, what: &str) -> Result<HeaderValue, Nlx402Error> {
    HeaderValue::from_str(value)
        .map_err(|_| Nlx402Error::Validation(format!("{what} is not a valid header value")))
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to NLx402 facilitator failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
