//! Client configuration.
//!
//! A [`ClientConfig`] names the facilitator to talk to and, optionally, the
//! API key used on authenticated endpoints. It can be assembled in code or
//! loaded from the environment:
//!
//! - `NLX402_BASE_URL` — facilitator base URL (default: `https://pay.thrt.ai`)
//! - `NLX402_API_KEY` — API key for authenticated endpoints
//!
//! # Example
//!
//! ```rust
//! use nlx402::ClientConfig;
//!
//! let config = ClientConfig::new()
//!     .with_base_url("https://facilitator.example///")
//!     .with_api_key("sk_test");
//! assert_eq!(config.base_url(), "https://facilitator.example");
//! ```

use crate::constants::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};

/// Configuration for a [`PaywallClient`](crate::PaywallClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the production facilitator, without an API key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the facilitator base URL. Trailing slashes are stripped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    /// Sets the API key sent as `x-api-key`.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Loads the configuration from `NLX402_BASE_URL` and `NLX402_API_KEY`.
    ///
    /// Unset or empty variables keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            config = config.with_api_key(api_key);
        }
        config
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the API key, if one is set.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

/// Strips every trailing `/` so that paths can be appended verbatim.
pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_points_at_production() {
        let config = ClientConfig::new();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let config = ClientConfig::new().with_base_url("https://host///");
        assert_eq!(config.base_url(), "https://host");
    }

    #[test]
    fn test_from_lookup_reads_both_variables() {
        let vars = HashMap::from([
            (BASE_URL_ENV, "http://localhost:8080/".to_owned()),
            (API_KEY_ENV, "sk_live".to_owned()),
        ]);
        let config = ClientConfig::from_lookup(|name| vars.get(name).cloned());
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert_eq!(config.api_key(), Some("sk_live"));
    }

    #[test]
    fn test_from_lookup_ignores_empty_values() {
        let config = ClientConfig::from_lookup(|_| Some(String::new()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new().with_api_key("super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("has_api_key: true"));
    }
}
