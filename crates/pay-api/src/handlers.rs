//! # Request Handlers
//!
//! Axum request handlers for the relay API.
//! Bodies are accepted as loosely-typed JSON and validated into pay-core
//! request types before any service is called.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use pay_core::{OrderRequest, PaymentError, VerificationRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create order request
#[derive(Debug, Deserialize)]
pub struct CreateOrderBody {
    /// Amount in major units; kept untyped so invalid values can be echoed
    #[serde(default)]
    pub amount: Option<Value>,
    /// Currency code (optional, defaults to INR)
    #[serde(default)]
    pub currency: Option<String>,
}

/// Verify payment request. Fields stay untyped so a wrong-typed value is
/// reported as a missing field rather than a body rejection.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentBody {
    #[serde(default)]
    pub razorpay_order_id: Option<Value>,
    #[serde(default)]
    pub razorpay_payment_id: Option<Value>,
    #[serde(default)]
    pub razorpay_signature: Option<Value>,
}

/// Only JSON strings count as present
fn string_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Verify payment response
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
}

impl VerifyPaymentResponse {
    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub razorpay: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            received: None,
            details: None,
            code: None,
        }
    }

    pub fn with_received(mut self, received: Value) -> Self {
        self.received = Some(received);
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_code(mut self, code: Option<&str>) -> Self {
        self.code = code.map(String::from);
        self
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

const INTERNAL_ERROR: &str = "Internal server error";
const ORDER_FAILED: &str = "Failed to create Razorpay order";

fn status_of(err: &PaymentError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// Map a create-order failure onto its JSON error body
fn order_error_to_response(err: PaymentError) -> ApiError {
    let status = status_of(&err);
    let body = match err {
        PaymentError::InvalidAmount { received } => {
            ErrorResponse::new("Valid amount is required").with_received(received)
        }
        ref e if e.is_client_error() => ErrorResponse::new(e.to_string()),
        ref e => ErrorResponse::new(ORDER_FAILED)
            .with_details(e.details())
            .with_code(e.code()),
    };
    (status, Json(body))
}

fn body_rejection_to_response(rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Invalid request body").with_details(rejection.body_text())),
    )
}

fn internal_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR)),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    info!("Health check received");
    Json(HealthResponse {
        status: "OK",
        message: "Server is running",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        razorpay: if state.provider_initialized() {
            "Initialized"
        } else {
            "Not initialized"
        },
    })
}

/// Create a provider order
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(body_rejection_to_response)?;
    info!("Create order request received: {:?}", body);

    let request = OrderRequest::from_body(body.amount, body.currency).map_err(|e| {
        warn!("Rejected order request: {}", e);
        order_error_to_response(e)
    })?;

    let service = state.orders.as_ref().ok_or_else(|| {
        error!("Create order called but Razorpay is not initialized");
        order_error_to_response(PaymentError::Configuration(
            "Payment provider not configured".to_string(),
        ))
    })?;

    let order = service
        .create_order(&request)
        .await
        .map_err(order_error_to_response)?;

    Ok(Json(order.into_response_body()))
}

/// Verify a checkout callback signature
#[instrument(skip_all)]
pub async fn verify_payment(
    State(state): State<AppState>,
    body: Result<Json<VerifyPaymentBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Rejected verification body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(VerifyPaymentResponse::new(false, "Invalid request body")),
            )
                .into_response();
        }
    };

    let request = match VerificationRequest::from_fields(
        string_field(body.razorpay_order_id),
        string_field(body.razorpay_payment_id),
        string_field(body.razorpay_signature),
    ) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected verification request: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(VerifyPaymentResponse::new(false, e.to_string())),
            )
                .into_response();
        }
    };

    let Some(service) = state.verification.as_ref() else {
        error!("Verify payment called but Razorpay is not initialized");
        return internal_error().into_response();
    };

    if service.verify_payment(&request) {
        Json(VerifyPaymentResponse::new(true, "Payment verified successfully")).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(VerifyPaymentResponse::new(false, "Payment verification failed")),
        )
            .into_response()
    }
}

/// Fallback for unknown routes and methods
pub async fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
}

/// Last-resort response for a handler that panicked. Nothing from the panic
/// payload reaches the client.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Unhandled error: {}", detail);
    internal_error().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_amount_response() {
        let (status, Json(body)) =
            order_error_to_response(PaymentError::InvalidAmount { received: json!(-3) });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Valid amount is required");
        assert_eq!(body.received, Some(json!(-3)));
    }

    #[test]
    fn test_provider_error_response() {
        let (status, Json(body)) = order_error_to_response(PaymentError::ProviderError {
            provider: "razorpay".into(),
            description: "card declined".into(),
            code: Some("BAD_REQUEST".into()),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, ORDER_FAILED);
        assert_eq!(body.details.as_deref(), Some("card declined"));
        assert_eq!(body.code.as_deref(), Some("BAD_REQUEST"));
    }

    #[test]
    fn test_error_body_omits_empty_fields() {
        let value = serde_json::to_value(ErrorResponse::new("Endpoint not found")).unwrap();
        assert_eq!(value, json!({ "error": "Endpoint not found" }));

        // a missing amount is still echoed, as null
        let value =
            serde_json::to_value(ErrorResponse::new("x").with_received(Value::Null)).unwrap();
        assert_eq!(value, json!({ "error": "x", "received": null }));
    }

    #[tokio::test]
    async fn test_panic_response_is_generic() {
        let response = handle_panic(Box::new("secret=abc".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("secret=abc"));

        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[test]
    fn test_string_field_rejects_non_strings() {
        assert_eq!(string_field(Some(json!("order_A"))), Some("order_A".to_string()));
        assert_eq!(string_field(Some(json!(123))), None);
        assert_eq!(string_field(Some(json!(null))), None);
        assert_eq!(string_field(None), None);
    }
}
