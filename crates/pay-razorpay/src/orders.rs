//! # Razorpay Orders
//!
//! Client for the Razorpay Orders API (`POST /v1/orders`).

use crate::config::RazorpayConfig;
use async_trait::async_trait;
use pay_core::{OrderCreationInput, OrderProvider, PaymentError, PaymentResult, ProviderOrder};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "razorpay";

/// Upstream body characters kept in a client-facing error detail
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Razorpay API client
pub struct RazorpayClient {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayClient {
    /// Create a new client; the configured timeout applies to every request
    pub fn new(config: RazorpayConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl OrderProvider for RazorpayClient {
    #[instrument(skip(self, input), fields(receipt = %input.receipt))]
    async fn create_order(&self, input: &OrderCreationInput) -> PaymentResult<ProviderOrder> {
        debug!(
            "Creating Razorpay order: amount={}, currency={}",
            input.amount, input.currency
        );

        let response = self
            .client
            .post(self.config.orders_url())
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(input)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PaymentError::ProviderTimeout {
                        provider: PROVIDER.to_string(),
                        after: self.config.timeout,
                    }
                } else {
                    PaymentError::provider(PROVIDER, e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::provider(PROVIDER, e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            // Parse Razorpay error
            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                return Err(PaymentError::ProviderError {
                    provider: PROVIDER.to_string(),
                    description: error_response.error.description,
                    code: error_response.error.code,
                });
            }

            let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(PaymentError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, excerpt),
            ));
        }

        let value: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Razorpay response: {}", e))
        })?;
        let order = ProviderOrder::try_from(value)?;

        info!("Created Razorpay order: id={:?}", order.id());
        Ok(order)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayError,
}

#[derive(Debug, Deserialize)]
struct RazorpayError {
    description: String,
    #[serde(default)]
    code: Option<String>,
}
