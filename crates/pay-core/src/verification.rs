//! # Payment Verification Types
//!
//! Callback data a client submits after checkout, to be checked against
//! the provider signature.

use crate::error::{PaymentError, PaymentResult};

/// Wire names of the callback fields
pub const ORDER_ID_FIELD: &str = "razorpay_order_id";
pub const PAYMENT_ID_FIELD: &str = "razorpay_payment_id";
pub const SIGNATURE_FIELD: &str = "razorpay_signature";

/// A complete payment callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub order_id: String,
    pub payment_id: String,
    /// Lowercase hex HMAC digest supplied by the client
    pub signature: String,
}

impl VerificationRequest {
    /// Build from optional fields; absent or empty fields are rejected
    pub fn from_fields(
        order_id: Option<String>,
        payment_id: Option<String>,
        signature: Option<String>,
    ) -> PaymentResult<Self> {
        Ok(Self {
            order_id: required(order_id, ORDER_ID_FIELD)?,
            payment_id: required(payment_id, PAYMENT_ID_FIELD)?,
            signature: required(signature, SIGNATURE_FIELD)?,
        })
    }

    /// The signed message: `order_id|payment_id`
    pub fn canonical_message(&self) -> String {
        format!("{}|{}", self.order_id, self.payment_id)
    }
}

fn required(value: Option<String>, field: &str) -> PaymentResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PaymentError::MissingField(field.to_string())),
    }
}
