//! Wire format types for the NLx402 API.
//!
//! Each type mirrors one JSON response shape of the facilitator. They are
//! plain values: parsed once per call, never cached or mutated.
//!
//! # Key Types
//!
//! - [`FacilitatorMetadata`] - `GET /api/metadata`
//! - [`AuthIdentity`] - `GET /api/auth/me`
//! - [`Quote`] - `GET /protected` without payment
//! - [`VerifyResult`] - `POST /verify`
//! - [`PaidAccess`] - `GET /protected` with an `x-payment` proof

mod price;
mod timestamp;

pub use price::TotalPrice;
pub use timestamp::UnixTimestamp;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of API key introspection (`GET /api/auth/me`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    /// Whether the key is valid.
    pub ok: bool,
    /// When the key was issued.
    pub created_at: UnixTimestamp,
    /// Wallet the key is bound to.
    pub wallet_id: String,
    /// Token mint the wallet charges in.
    pub selected_mint: String,
}

/// Network details nested in [`FacilitatorMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataInfo {
    /// Network the facilitator settles on.
    pub network: String,
    /// Chains accepted for payment, in server order.
    pub supported_chains: Vec<String>,
    /// Facilitator protocol version.
    pub version: String,
}

/// Public facilitator metadata (`GET /api/metadata`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitatorMetadata {
    /// Whether the request succeeded.
    pub ok: bool,
    /// Network details.
    pub metadata: MetadataInfo,
    /// Token mints accepted for payment, in server order.
    ///
    /// Some deployments name this field `supported_tokens`.
    #[serde(default, alias = "supported_tokens")]
    pub supported_mints: Vec<String>,
}

/// A priced, time-limited offer for the protected resource.
///
/// The [`nonce`](Self::nonce) threads the quote through verification and
/// payment. Fields the SDK does not model are kept in
/// [`extra`](Self::extra) so that the quote echoed to `/verify` is the
/// quote the server issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Price in the token's smallest unit, as a decimal string.
    pub amount: String,
    /// Chain to pay on.
    pub chain: String,
    /// Decimals of the token mint.
    pub decimals: u32,
    /// Expiry of the offer.
    pub expires_at: UnixTimestamp,
    /// Token mint to pay with.
    pub mint: String,
    /// Network to pay on.
    pub network: String,
    /// Correlation token, unique per quote.
    pub nonce: String,
    /// Address that receives the payment.
    pub recipient: String,
    /// Protocol version of the quote.
    pub version: String,
    /// Any additional fields sent by the facilitator.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    /// Returns `true` if the quote expired at or before `at`.
    #[must_use]
    pub fn is_expired_at(&self, at: &UnixTimestamp) -> bool {
        self.expires_at.as_f64() <= at.as_f64()
    }

    /// Returns `true` if the quote has expired by the system clock.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&UnixTimestamp::now())
    }

    /// Serializes the quote as the compact JSON sent in `payment_data`.
    ///
    /// # Errors
    ///
    /// Returns an error if a value in [`extra`](Self::extra) cannot be encoded.
    pub fn to_payment_data(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Result of quote verification (`POST /verify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResult {
    /// Whether the server re-derived the quote and found it untampered.
    pub ok: bool,
}

/// Settlement state reported with a paid response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    /// The payment was accepted.
    Paid,
    /// Any other status string, kept verbatim.
    Other(String),
}

impl PaymentStatus {
    /// Returns the wire form of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Paid => "paid",
            Self::Other(status) => status,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        if value == "paid" {
            Self::Paid
        } else {
            Self::Other(value)
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Paid => "paid".to_owned(),
            PaymentStatus::Other(status) => status,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment details nested in [`PaidAccess`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// Amount paid, as a decimal string.
    pub amount: String,
    /// Decimals of the token mint.
    pub decimals: u32,
    /// Token mint paid with.
    pub mint: String,
    /// Nonce of the redeemed quote.
    pub nonce: String,
    /// Settlement state.
    pub status: PaymentStatus,
    /// On-chain transaction signature supplied by the caller.
    pub tx: String,
    /// Protocol version.
    pub version: String,
}

/// Response to a paid request (`GET /protected` with `x-payment`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidAccess {
    /// Whether access was granted.
    pub ok: bool,
    /// Payment details.
    pub x402: PaymentReceipt,
}

impl PaidAccess {
    /// Returns `true` if access was granted for a settled payment.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.ok && self.x402.status == PaymentStatus::Paid
    }

    /// Returns `true` if this payment redeemed `quote`.
    #[must_use]
    pub fn matches_quote(&self, quote: &Quote) -> bool {
        self.x402.nonce == quote.nonce
    }
}

/// Payment proof carried in the `x-payment` header.
///
/// Serializes as compact JSON with `tx` first: `{"tx":"..","nonce":".."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentProof<'a> {
    /// On-chain transaction signature.
    pub tx: &'a str,
    /// Nonce of the quote being paid.
    pub nonce: &'a str,
}

impl PaymentProof<'_> {
    /// Encodes the proof as the `x-payment` header value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_header_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Output of [`PaywallClient::get_and_verify_quote`](crate::PaywallClient::get_and_verify_quote).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteAndVerify {
    /// The issued quote.
    pub quote: Quote,
    /// The verification of that quote.
    pub verify: VerifyResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quote_json() -> Value {
        json!({
            "amount": "500000",
            "chain": "solana",
            "decimals": 6,
            "expires_at": 1_731_974_400,
            "mint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "network": "mainnet-beta",
            "nonce": "q_7f3a",
            "recipient": "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin",
            "version": "1"
        })
    }

    #[test]
    fn test_quote_parses_all_fields() {
        let quote: Quote = serde_json::from_value(quote_json()).unwrap();
        assert_eq!(quote.amount, "500000");
        assert_eq!(quote.decimals, 6);
        assert_eq!(quote.expires_at.as_secs(), Some(1_731_974_400));
        assert_eq!(quote.nonce, "q_7f3a");
        assert!(quote.extra.is_empty());
    }

    #[test]
    fn test_quote_keeps_unknown_fields_for_verify() {
        let mut raw = quote_json();
        raw["memo"] = json!("invoice-42");
        let quote: Quote = serde_json::from_value(raw).unwrap();
        assert_eq!(quote.extra.get("memo"), Some(&json!("invoice-42")));

        let echoed: Value = serde_json::from_str(&quote.to_payment_data().unwrap()).unwrap();
        assert_eq!(echoed["memo"], "invoice-42");
        assert_eq!(echoed["nonce"], "q_7f3a");
        assert_eq!(echoed["expires_at"], 1_731_974_400);
    }

    #[test]
    fn test_quote_missing_nonce_is_rejected() {
        let mut raw = quote_json();
        raw.as_object_mut().unwrap().remove("nonce");
        assert!(serde_json::from_value::<Quote>(raw).is_err());
    }

    #[test]
    fn test_response_types_have_total_equality() {
        fn total_eq<T: Eq>(_: &T) {}

        let quote: Quote = serde_json::from_value(quote_json()).unwrap();
        total_eq(&quote);
        total_eq(&quote.expires_at);
        total_eq(&QuoteAndVerify {
            quote: quote.clone(),
            verify: VerifyResult { ok: true },
        });
        let identity: AuthIdentity = serde_json::from_value(json!({
            "ok": true,
            "created_at": 1_731_900_000.5,
            "wallet_id": "wal_123",
            "selected_mint": "USDC"
        }))
        .unwrap();
        total_eq(&identity);
        assert_eq!(identity, identity.clone());
    }

    #[test]
    fn test_quote_expiry() {
        let quote: Quote = serde_json::from_value(quote_json()).unwrap();
        assert!(!quote.is_expired_at(&UnixTimestamp::from_secs(1_731_974_399)));
        assert!(quote.is_expired_at(&UnixTimestamp::from_secs(1_731_974_400)));
    }

    #[test]
    fn test_metadata_accepts_supported_tokens_alias() {
        let metadata: FacilitatorMetadata = serde_json::from_value(json!({
            "ok": true,
            "metadata": {
                "network": "mainnet-beta",
                "supported_chains": ["solana", "base"],
                "version": "1"
            },
            "supported_tokens": ["USDC"]
        }))
        .unwrap();
        assert_eq!(metadata.metadata.supported_chains, vec!["solana", "base"]);
        assert_eq!(metadata.supported_mints, vec!["USDC"]);
    }

    #[test]
    fn test_payment_proof_is_compact_and_ordered() {
        let proof = PaymentProof {
            tx: "5Nf3sig",
            nonce: "q_7f3a",
        };
        assert_eq!(
            proof.to_header_value().unwrap(),
            r#"{"tx":"5Nf3sig","nonce":"q_7f3a"}"#
        );
    }

    #[test]
    fn test_paid_access_status() {
        let paid: PaidAccess = serde_json::from_value(json!({
            "ok": true,
            "x402": {
                "amount": "500000",
                "decimals": 6,
                "mint": "USDC",
                "nonce": "q_7f3a",
                "status": "paid",
                "tx": "5Nf3...sig",
                "version": "1"
            }
        }))
        .unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.x402.status.as_str(), "paid");

        let pending = PaidAccess {
            x402: PaymentReceipt {
                status: PaymentStatus::from("pending".to_owned()),
                ..paid.x402.clone()
            },
            ..paid
        };
        assert!(!pending.is_paid());
        assert_eq!(
            serde_json::to_value(&pending.x402.status).unwrap(),
            json!("pending")
        );
    }
}
