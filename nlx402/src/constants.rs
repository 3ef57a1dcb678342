//! Endpoint paths, header names and defaults of the NLx402 API.

/// Production facilitator used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://pay.thrt.ai";

/// Price sent in `x-total-price` when the caller does not supply one.
pub const DEFAULT_TOTAL_PRICE: &str = "0.5";

/// Public facilitator metadata.
pub const METADATA_PATH: &str = "/api/metadata";

/// API key introspection.
pub const AUTH_ME_PATH: &str = "/api/auth/me";

/// Protected resource; serves both the quote and the paid response.
pub const PROTECTED_PATH: &str = "/protected";

/// Quote verification.
pub const VERIFY_PATH: &str = "/verify";

/// API key header sent on authenticated endpoints.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Requested price header sent with the quote request.
pub const TOTAL_PRICE_HEADER: &str = "x-total-price";

/// Payment proof header, a JSON object `{"tx": .., "nonce": ..}`.
pub const PAYMENT_HEADER: &str = "x-payment";

/// Content type of the verify request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Verify form field carrying the JSON-encoded quote.
pub const PAYMENT_DATA_FIELD: &str = "payment_data";

/// Verify form field carrying the quote nonce.
pub const NONCE_FIELD: &str = "nonce";

/// Environment variable read by [`ClientConfig::from_env`](crate::ClientConfig::from_env).
pub const BASE_URL_ENV: &str = "NLX402_BASE_URL";

/// Environment variable read by [`ClientConfig::from_env`](crate::ClientConfig::from_env).
pub const API_KEY_ENV: &str = "NLX402_API_KEY";
