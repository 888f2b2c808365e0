//! # pay-core
//!
//! Core types and traits for the razorpay relay.
//!
//! This crate provides:
//! - `OrderProvider` and `SignatureVerifier` traits for plugging in a gateway
//! - `OrderRequest`, `OrderCreationInput` and `ProviderOrder` for order creation
//! - `VerificationRequest` for payment callback checks
//! - `OrderService` and `VerificationService` built on the injected traits
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{OrderRequest, OrderService};
//! use serde_json::json;
//!
//! let service = OrderService::new(provider, std::time::Duration::from_secs(30));
//! let request = OrderRequest::from_body(Some(json!(10.5)), None)?;
//!
//! // Provider receives amount=1050, currency=INR, payment_capture=1
//! let order = service.create_order(&request).await?;
//! ```

pub mod error;
pub mod money;
pub mod order;
pub mod provider;
pub mod service;
pub mod verification;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use money::{to_minor_units, Currency, DEFAULT_CURRENCY};
pub use order::{OrderCreationInput, OrderRequest, ProviderOrder, Receipt, CAPTURE_IMMEDIATE};
pub use provider::{BoxedOrderProvider, BoxedSignatureVerifier, OrderProvider, SignatureVerifier};
pub use service::{OrderService, VerificationService, DEFAULT_PROVIDER_TIMEOUT};
pub use verification::{
    VerificationRequest, ORDER_ID_FIELD, PAYMENT_ID_FIELD, SIGNATURE_FIELD,
};
