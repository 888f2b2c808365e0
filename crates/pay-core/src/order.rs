//! # Order Types
//!
//! Order request validation and the provider-facing creation input.

use crate::error::{PaymentError, PaymentResult};
use crate::money::{to_minor_units, Currency};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Immediate capture flag as the provider expects it
pub const CAPTURE_IMMEDIATE: u8 = 1;

/// A validated order request, amount in major units
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub amount: f64,
    pub currency: Currency,
}

impl OrderRequest {
    /// Validate the untyped request fields.
    ///
    /// `amount` must be a finite JSON number greater than zero. The raw value
    /// is echoed in `InvalidAmount` (JSON `null` when absent).
    pub fn from_body(amount: Option<Value>, currency: Option<String>) -> PaymentResult<Self> {
        let received = amount.unwrap_or(Value::Null);
        let amount = match received.as_f64() {
            Some(a) if a.is_finite() && a > 0.0 => a,
            _ => return Err(PaymentError::InvalidAmount { received }),
        };

        let currency = match currency {
            Some(code) => Currency::parse(&code)?,
            None => Currency::default(),
        };

        Ok(Self { amount, currency })
    }

    /// Amount converted to minor units
    pub fn amount_minor(&self) -> PaymentResult<i64> {
        to_minor_units(self.amount).ok_or_else(|| PaymentError::InvalidAmount {
            received: serde_json::json!(self.amount),
        })
    }
}

/// Merchant-side reconciliation identifier attached to an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    /// `receipt_<unix millis>_<8 hex>`; the random suffix keeps receipts
    /// distinct within the same millisecond.
    pub fn generate() -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "receipt_{}_{}",
            Utc::now().timestamp_millis(),
            &suffix[..8]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload handed to the provider's order-creation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreationInput {
    /// Amount in minor units
    pub amount: i64,
    pub currency: Currency,
    pub receipt: Receipt,
    pub payment_capture: u8,
}

impl OrderCreationInput {
    /// Build the provider input for a validated request
    pub fn from_request(request: &OrderRequest) -> PaymentResult<Self> {
        Ok(Self {
            amount: request.amount_minor()?,
            currency: request.currency.clone(),
            receipt: Receipt::generate(),
            payment_capture: CAPTURE_IMMEDIATE,
        })
    }
}

/// Order object as returned by the provider, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderOrder(Map<String, Value>);

impl ProviderOrder {
    /// Provider order id, if present
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|v| v.as_str())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// `{success: true, ...fields}`; provider fields win on key collision
    pub fn into_response_body(self) -> Value {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));
        body.extend(self.0);
        Value::Object(body)
    }
}

impl TryFrom<Value> for ProviderOrder {
    type Error = PaymentError;

    fn try_from(value: Value) -> PaymentResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(PaymentError::Serialization(format!(
                "Expected order object, got {}",
                other
            ))),
        }
    }
}
