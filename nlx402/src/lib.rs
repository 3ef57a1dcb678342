#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core client for the NLx402 pay-per-request API.
//!
//! NLx402 gates a protected resource behind an x402-style payment flow. A
//! caller asks the facilitator for a priced quote, has the facilitator lock
//! that quote, pays on-chain, and finally redeems the payment proof for the
//! protected response. Every step is correlated by the quote's nonce:
//!
//! ```text
//! GET  /protected   (x-total-price)  -> Quote { nonce, .. }      quoted
//! POST /verify      (payment_data)   -> VerifyResult              verified
//! GET  /protected   (x-payment)      -> PaidAccess { x402, .. }   paid
//! ```
//!
//! This crate is transport-agnostic. [`PaywallClient`] builds plain
//! [`http::Request`] values and hands them to an [`HttpTransport`]; the
//! `nlx402-http` crate provides the `reqwest`-backed implementation.
//!
//! # Modules
//!
//! - [`client`] - [`PaywallClient`] and the protocol operations
//! - [`config`] - Client configuration and environment loading
//! - [`constants`] - Endpoint paths, header names and defaults
//! - [`error`] - The [`Nlx402Error`] taxonomy
//! - [`proto`] - Wire format types returned by the facilitator
//! - [`transport`] - The [`HttpTransport`] abstraction
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for every client operation

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod proto;
pub mod transport;

pub use client::PaywallClient;
pub use config::ClientConfig;
pub use error::{ErrorBody, Nlx402Error};
pub use proto::{
    AuthIdentity, FacilitatorMetadata, MetadataInfo, PaidAccess, PaymentProof, PaymentReceipt,
    PaymentStatus, Quote, QuoteAndVerify, TotalPrice, UnixTimestamp, VerifyResult,
};
pub use transport::{BoxFuture, HttpTransport, TransportError};
