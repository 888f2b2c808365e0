//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the order and verification services, built once at startup.

use pay_core::{OrderService, VerificationService};
use pay_razorpay::{RazorpayClient, RazorpayConfig, RazorpaySignatureVerifier};
use std::net::SocketAddr;
use std::sync::Arc;

/// Frontend origins allowed when `ALLOWED_ORIGINS` is unset
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Origins permitted by CORS; may contain `*.` wildcards
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(|_| {
                    DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
                }),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            environment: "development".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: Arc<AppConfig>,
    /// Order creation; `None` when provider credentials are missing
    pub orders: Option<OrderService>,
    /// Callback verification; `None` when provider credentials are missing
    pub verification: Option<VerificationService>,
}

impl AppState {
    /// Build state from the environment.
    ///
    /// Missing Razorpay credentials are not fatal: the server still starts and
    /// reports the provider as not initialized.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        match RazorpayConfig::from_env() {
            Ok(razorpay) => {
                tracing::info!(
                    "Razorpay configured: key_id=set, test_mode={}",
                    razorpay.is_test_mode()
                );
                let client = RazorpayClient::new(razorpay.clone())
                    .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;
                let orders = OrderService::new(Arc::new(client), razorpay.timeout);
                let verification = VerificationService::new(Arc::new(
                    RazorpaySignatureVerifier::from_config(&razorpay),
                ));
                Ok(Self::with_services(config, Some(orders), Some(verification)))
            }
            Err(e) => {
                tracing::warn!("Razorpay not initialized: {}", e);
                Ok(Self::with_services(config, None, None))
            }
        }
    }

    /// Assemble state from explicit parts (used by tests)
    pub fn with_services(
        config: AppConfig,
        orders: Option<OrderService>,
        verification: Option<VerificationService>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            orders,
            verification,
        }
    }

    /// Whether the payment provider is ready to take calls
    pub fn provider_initialized(&self) -> bool {
        self.orders.is_some() && self.verification.is_some()
    }
}
