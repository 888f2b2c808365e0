//! # pay-razorpay
//!
//! Razorpay integration for the relay.
//!
//! - **RazorpayClient** implements `OrderProvider` over the Orders API
//!   (HTTP basic auth with the key id and secret).
//! - **RazorpaySignatureVerifier** implements `SignatureVerifier`, checking
//!   the `razorpay_signature` a browser posts back after checkout.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_razorpay::{RazorpayClient, RazorpayConfig, RazorpaySignatureVerifier};
//! use pay_core::{OrderService, VerificationService};
//! use std::sync::Arc;
//!
//! let config = RazorpayConfig::from_env()?;
//! let orders = OrderService::new(Arc::new(RazorpayClient::new(config.clone())?), config.timeout);
//! let verification = VerificationService::new(Arc::new(RazorpaySignatureVerifier::from_config(&config)));
//! ```

pub mod config;
pub mod orders;
pub mod signature;

// Re-exports
pub use config::RazorpayConfig;
pub use orders::RazorpayClient;
pub use signature::RazorpaySignatureVerifier;
