//! # pay-api
//!
//! HTTP API layer for the razorpay relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Order creation and payment verification endpoints
//! - CORS for the configured frontend origins
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-order` | Create a Razorpay order |
//! | POST | `/verify-payment` | Verify a checkout signature |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
