//! # Provider Traits
//!
//! Seams between the services and a concrete payment gateway.
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │   OrderProvider (trait)      │   │  SignatureVerifier (trait)   │
//! │  ├── create_order()          │   │  └── verify()                │
//! │  └── provider_name()         │   │                              │
//! └──────────────────────────────┘   └──────────────────────────────┘
//!               ▲                                   ▲
//!       ┌───────┴────────┐                ┌─────────┴─────────┐
//!       │ RazorpayClient │                │ RazorpaySignature │
//!       │                │                │     Verifier      │
//!       └────────────────┘                └───────────────────┘
//! ```
//!
//! Both are injected into the services at construction time so tests can
//! substitute fakes.

use crate::error::PaymentResult;
use crate::order::{OrderCreationInput, ProviderOrder};
use crate::verification::VerificationRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// A gateway capable of creating orders
#[async_trait]
pub trait OrderProvider: Send + Sync {
    /// Create an order and return the provider's order object unmodified.
    async fn create_order(&self, input: &OrderCreationInput) -> PaymentResult<ProviderOrder>;

    /// Get the provider name (for logging and error reporting).
    fn provider_name(&self) -> &'static str;
}

/// Checks a payment callback signature
pub trait SignatureVerifier: Send + Sync {
    /// True iff the request signature authenticates its order and payment ids.
    fn verify(&self, request: &VerificationRequest) -> bool;
}

/// Type alias for a shared order provider (dynamic dispatch)
pub type BoxedOrderProvider = Arc<dyn OrderProvider>;

/// Type alias for a shared signature verifier
pub type BoxedSignatureVerifier = Arc<dyn SignatureVerifier>;
