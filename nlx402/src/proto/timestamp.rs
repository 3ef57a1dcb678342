//! Unix timestamps as sent by the facilitator.
//!
//! The facilitator reports `created_at` and `expires_at` as bare JSON
//! numbers, sometimes integral and sometimes fractional. [`UnixTimestamp`]
//! keeps the number exactly as received, so a quote that is echoed back to
//! `/verify` serializes to the same digits the server produced.

use std::fmt::{Display, Formatter};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Seconds since the Unix epoch, kept in the JSON form the server sent.
///
/// ```json
/// 1731974400
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(Number);

impl UnixTimestamp {
    /// Creates a timestamp from whole seconds.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self(Number::from(secs))
    }

    /// Returns the current system time.
    ///
    /// A clock set before the epoch reads as `0`.
    #[must_use]
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Self::from_secs(secs)
    }

    /// Returns the timestamp as whole seconds, truncating any fraction.
    ///
    /// `None` for negative or non-representable values.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn as_secs(&self) -> Option<u64> {
        self.0.as_u64().or_else(|| {
            self.0
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0 && *v <= u64::MAX as f64)
                .map(|v| v.trunc() as u64)
        })
    }

    /// Returns the timestamp as fractional seconds.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.as_f64().unwrap_or(f64::NAN)
    }
}

impl From<Number> for UnixTimestamp {
    fn from(value: Number) -> Self {
        Self(value)
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_round_trips_without_fraction() {
        let ts: UnixTimestamp = serde_json::from_str("1731974400").unwrap();
        assert_eq!(ts.as_secs(), Some(1_731_974_400));
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1731974400");
    }

    #[test]
    fn test_fractional_is_preserved() {
        let ts: UnixTimestamp = serde_json::from_str("1731974400.25").unwrap();
        assert_eq!(ts.as_secs(), Some(1_731_974_400));
        assert!((ts.as_f64() - 1_731_974_400.25).abs() < 1e-6);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1731974400.25");
    }

    #[test]
    fn test_out_of_range_has_no_secs() {
        let ts: UnixTimestamp = serde_json::from_str("1e30").unwrap();
        assert_eq!(ts.as_secs(), None);
        assert_eq!(
            UnixTimestamp::from_secs(7),
            UnixTimestamp::from(Number::from(7u64))
        );
    }

    #[test]
    fn test_negative_has_no_secs() {
        let ts: UnixTimestamp = serde_json::from_str("-5").unwrap();
        assert_eq!(ts.as_secs(), None);
    }

    #[test]
    fn test_rejects_strings() {
        assert!(serde_json::from_str::<UnixTimestamp>("\"1731974400\"").is_err());
    }
}
