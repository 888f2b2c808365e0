//! # Services
//!
//! `OrderService` validates nothing itself: it receives an already-validated
//! `OrderRequest`, derives the provider input and delegates.
//! `VerificationService` is a pure wrapper over the injected verifier.

use crate::error::{PaymentError, PaymentResult};
use crate::order::{OrderCreationInput, OrderRequest, ProviderOrder};
use crate::provider::{BoxedOrderProvider, BoxedSignatureVerifier};
use crate::verification::VerificationRequest;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Default bound on a single provider call
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates orders through the injected provider
#[derive(Clone)]
pub struct OrderService {
    provider: BoxedOrderProvider,
    timeout: Duration,
}

impl OrderService {
    pub fn new(provider: BoxedOrderProvider, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    #[instrument(skip(self, request), fields(provider = self.provider.provider_name()))]
    pub async fn create_order(&self, request: &OrderRequest) -> PaymentResult<ProviderOrder> {
        let input = OrderCreationInput::from_request(request)?;

        info!(
            amount = input.amount,
            currency = %input.currency,
            receipt = %input.receipt,
            "Creating order"
        );

        let order = match tokio::time::timeout(self.timeout, self.provider.create_order(&input)).await
        {
            Ok(Ok(order)) => order,
            Ok(Err(e)) => {
                error!("Order creation failed: {}", e);
                return Err(e);
            }
            Err(_) => {
                warn!("Provider did not answer within {:?}", self.timeout);
                return Err(PaymentError::ProviderTimeout {
                    provider: self.provider.provider_name().to_string(),
                    after: self.timeout,
                });
            }
        };

        info!("Order created: id={:?}", order.id());
        Ok(order)
    }
}

/// Authenticates payment callbacks
#[derive(Clone)]
pub struct VerificationService {
    verifier: BoxedSignatureVerifier,
}

impl VerificationService {
    pub fn new(verifier: BoxedSignatureVerifier) -> Self {
        Self { verifier }
    }

    #[instrument(skip(self, request), fields(order_id = %request.order_id, payment_id = %request.payment_id))]
    pub fn verify_payment(&self, request: &VerificationRequest) -> bool {
        let valid = self.verifier.verify(request);
        if valid {
            info!("Payment signature verified");
        } else {
            warn!("Payment signature mismatch");
        }
        valid
    }
}
