//! # Payment Signature Verification
//!
//! Razorpay signs a successful checkout as
//! `hex(HMAC-SHA256(key_secret, order_id + "|" + payment_id))`.

use crate::config::RazorpayConfig;
use hmac::{Hmac, Mac};
use pay_core::{SignatureVerifier, VerificationRequest};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies checkout callbacks with the account key secret
pub struct RazorpaySignatureVerifier {
    key_secret: String,
}

impl RazorpaySignatureVerifier {
    pub fn new(key_secret: impl Into<String>) -> Self {
        Self {
            key_secret: key_secret.into(),
        }
    }

    pub fn from_config(config: &RazorpayConfig) -> Self {
        Self::new(config.key_secret.clone())
    }

    /// Lowercase hex signature Razorpay would issue for this order/payment pair
    pub fn expected_signature(&self, order_id: &str, payment_id: &str) -> String {
        compute_hmac_sha256(&self.key_secret, &format!("{}|{}", order_id, payment_id))
    }
}

impl SignatureVerifier for RazorpaySignatureVerifier {
    fn verify(&self, request: &VerificationRequest) -> bool {
        let expected = compute_hmac_sha256(&self.key_secret, &request.canonical_message());
        constant_time_compare(&request.signature, &expected)
    }
}

fn compute_hmac_sha256(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Byte-exact, case-sensitive comparison whose running time does not depend
/// on where the first differing byte is.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
