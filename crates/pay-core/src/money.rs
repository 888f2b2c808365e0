//! # Money
//!
//! Currency codes and major→minor unit conversion.
//! Every amount sent to the provider is an integer in minor units (paise, cents).

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Currency used when the request does not name one
pub const DEFAULT_CURRENCY: &str = "INR";

/// Minor units per major unit. Only two-decimal currencies are handled.
const MINOR_PER_MAJOR: f64 = 100.0;

/// ISO 4217 style currency code, always uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Parse a three-letter code, normalizing case
    pub fn parse(code: &str) -> PaymentResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PaymentError::InvalidRequest(format!(
                "Unsupported currency code: {:?}",
                code
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the currency code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert a major-unit amount to minor units.
///
/// Uses round-half-away-from-zero (`f64::round`): an exact half-paise such as
/// 0.125 becomes 13. Returns `None` when the scaled value
/// is not finite or does not fit in an `i64`.
pub fn to_minor_units(amount: f64) -> Option<i64> {
    let scaled = (amount * MINOR_PER_MAJOR).round();
    if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled <= i64::MIN as f64 {
        return None;
    }
    Some(scaled as i64)
}
