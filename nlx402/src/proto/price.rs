//! The requested price sent with a quote request.

use std::fmt::{Display, Formatter};

use crate::constants::DEFAULT_TOTAL_PRICE;
use crate::error::Nlx402Error;

/// Value of the `x-total-price` header.
///
/// Numbers are converted with their plain `Display` form, so `0.002` is
/// sent as `0.002` and never rounded. Strings are sent verbatim.
///
/// ```rust
/// use nlx402::TotalPrice;
///
/// assert_eq!(TotalPrice::from(0.002).as_str(), "0.002");
/// assert_eq!(TotalPrice::default().as_str(), "0.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TotalPrice(String);

impl TotalPrice {
    /// Returns the header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks that the price can be sent.
    ///
    /// # Errors
    ///
    /// Returns [`Nlx402Error::Validation`] for a blank value, a value with
    /// surrounding whitespace, or a non-finite number.
    pub fn validate(&self) -> Result<&str, Nlx402Error> {
        let value = self.0.as_str();
        if value.trim().is_empty() {
            return Err(Nlx402Error::Validation(
                "get_quote: total price must not be empty".to_owned(),
            ));
        }
        if value.trim() != value {
            return Err(Nlx402Error::Validation(format!(
                "get_quote: total price must not have surrounding whitespace, got {value:?}"
            )));
        }
        if value.parse::<f64>().is_ok_and(|v| !v.is_finite()) {
            return Err(Nlx402Error::Validation(format!(
                "get_quote: total price must be finite, got {value}"
            )));
        }
        Ok(value)
    }
}

impl Default for TotalPrice {
    fn default() -> Self {
        Self(DEFAULT_TOTAL_PRICE.to_owned())
    }
}

impl From<f64> for TotalPrice {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<u32> for TotalPrice {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for TotalPrice {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TotalPrice {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for TotalPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_uses_plain_display() {
        assert_eq!(TotalPrice::from(0.002).as_str(), "0.002");
        assert_eq!(TotalPrice::from(0.5).as_str(), "0.5");
        assert_eq!(TotalPrice::from(2u32).as_str(), "2");
    }

    #[test]
    fn test_strings_are_verbatim() {
        assert_eq!(TotalPrice::from("0.0020").as_str(), "0.0020");
    }

    #[test]
    fn test_validate_rejects_blank_and_non_finite() {
        assert!(matches!(
            TotalPrice::from("  ").validate(),
            Err(Nlx402Error::Validation(_))
        ));
        assert!(matches!(
            TotalPrice::from(f64::NAN).validate(),
            Err(Nlx402Error::Validation(_))
        ));
        assert!(matches!(
            TotalPrice::from(f64::INFINITY).validate(),
            Err(Nlx402Error::Validation(_))
        ));
        assert_eq!(TotalPrice::from(1.25).validate().unwrap(), "1.25");
    }

    #[test]
    fn test_validate_sends_value_unchanged() {
        assert!(matches!(
            TotalPrice::from(" 0.5 ").validate(),
            Err(Nlx402Error::Validation(_))
        ));
        assert!(matches!(
            TotalPrice::from("0.5\t").validate(),
            Err(Nlx402Error::Validation(_))
        ));
        assert_eq!(TotalPrice::from("0.0020").validate().unwrap(), "0.0020");
    }
}
