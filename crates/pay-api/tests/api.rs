//! End-to-end route tests against a fake order provider.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use hmac::{Hmac, Mac};
use pay_api::{create_router, AppConfig, AppState};
use pay_core::{
    OrderCreationInput, OrderProvider, OrderService, PaymentError, PaymentResult, ProviderOrder,
    VerificationService, DEFAULT_PROVIDER_TIMEOUT,
};
use pay_razorpay::RazorpaySignatureVerifier;
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SECRET: &str = "test_key_secret";

enum Behavior {
    Succeed,
    Reject {
        description: &'static str,
        code: Option<&'static str>,
    },
    Stall,
    Panic,
}

struct FakeProvider {
    behavior: Behavior,
    calls: Mutex<Vec<OrderCreationInput>>,
}

impl FakeProvider {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<OrderCreationInput> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderProvider for FakeProvider {
    async fn create_order(&self, input: &OrderCreationInput) -> PaymentResult<ProviderOrder> {
        self.calls.lock().unwrap().push(input.clone());
        match &self.behavior {
            Behavior::Succeed => ProviderOrder::try_from(json!({
                "id": "order_Fake123",
                "entity": "order",
                "amount": input.amount,
                "currency": input.currency,
                "receipt": input.receipt,
                "status": "created"
            })),
            Behavior::Reject { description, code } => Err(PaymentError::ProviderError {
                provider: "fake".to_string(),
                description: description.to_string(),
                code: code.map(String::from),
            }),
            Behavior::Stall => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(ProviderOrder::default())
            }
            Behavior::Panic => panic!("provider exploded: key_secret={}", SECRET),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn config() -> AppConfig {
    AppConfig {
        allowed_origins: vec![
            "http://localhost:3000".to_string(),
            "https://*.vercel.app".to_string(),
        ],
        ..AppConfig::default()
    }
}

fn server_with(provider: Arc<FakeProvider>) -> TestServer {
    server_with_timeout(provider, DEFAULT_PROVIDER_TIMEOUT)
}

fn server_with_timeout(provider: Arc<FakeProvider>, timeout: Duration) -> TestServer {
    let orders = OrderService::new(provider, timeout);
    let verification = VerificationService::new(Arc::new(RazorpaySignatureVerifier::new(SECRET)));
    let state = AppState::with_services(config(), Some(orders), Some(verification));
    TestServer::new(create_router(state)).unwrap()
}

fn uninitialized_server() -> TestServer {
    let state = AppState::with_services(config(), None, None);
    TestServer::new(create_router(state)).unwrap()
}

fn sign(order_id: &str, payment_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

// =============================================================================
// /health
// =============================================================================

#[tokio::test]
async fn health_reports_provider_initialized() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
    assert_eq!(body["razorpay"], "Initialized");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn health_reports_provider_missing() {
    let body: Value = uninitialized_server().get("/health").await.json();
    assert_eq!(body["razorpay"], "Not initialized");
}

// =============================================================================
// /create-order
// =============================================================================

#[tokio::test]
async fn create_order_defaults_currency_and_converts_amount() {
    let provider = FakeProvider::new(Behavior::Succeed);
    let server = server_with(provider.clone());

    let response = server.post("/create-order").json(&json!({ "amount": 1 })).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].amount, 100);
    assert_eq!(calls[0].currency.as_str(), "INR");
    assert_eq!(calls[0].payment_capture, 1);
    assert!(!calls[0].receipt.as_str().is_empty());

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["id"], "order_Fake123");
    assert_eq!(body["amount"], 100);
    assert_eq!(body["status"], "created");
}

#[tokio::test]
async fn create_order_rounds_to_minor_units() {
    let provider = FakeProvider::new(Behavior::Succeed);
    let server = server_with(provider.clone());

    server
        .post("/create-order")
        .json(&json!({ "amount": 10.5, "currency": "usd" }))
        .await;

    let calls = provider.calls();
    assert_eq!(calls[0].amount, 1050);
    assert_eq!(calls[0].currency.as_str(), "USD");
}

#[tokio::test]
async fn create_order_rejects_invalid_amounts_without_calling_provider() {
    let provider = FakeProvider::new(Behavior::Succeed);
    let server = server_with(provider.clone());

    for amount in [json!(0), json!(-10), json!("abc"), json!(null)] {
        let response = server
            .post("/create-order")
            .json(&json!({ "amount": amount.clone() }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "Valid amount is required");
        assert_eq!(body["received"], amount);
    }

    let response = server.post("/create-order").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["received"], Value::Null);

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn create_order_reports_structured_provider_error() {
    let server = server_with(FakeProvider::new(Behavior::Reject {
        description: "card declined",
        code: Some("BAD_REQUEST"),
    }));

    let response = server.post("/create-order").json(&json!({ "amount": 5 })).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to create Razorpay order");
    assert_eq!(body["details"], "card declined");
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_order_omits_code_when_provider_gives_none() {
    let server = server_with(FakeProvider::new(Behavior::Reject {
        description: "connection reset",
        code: None,
    }));

    let body: Value = server
        .post("/create-order")
        .json(&json!({ "amount": 5 }))
        .await
        .json();

    assert_eq!(body["details"], "connection reset");
    assert!(body.get("code").is_none());
}

#[tokio::test]
async fn create_order_reports_provider_timeout() {
    let provider = FakeProvider::new(Behavior::Stall);
    let server = server_with_timeout(provider.clone(), Duration::from_millis(50));

    let response = server.post("/create-order").json(&json!({ "amount": 5 })).await;
    assert_eq!(response.status_code(), StatusCode::GATEWAY_TIMEOUT);

    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to create Razorpay order");
    assert_eq!(body["code"], "TIMEOUT");
    assert_eq!(body["details"], "Provider fake timed out after 50ms");
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test]
async fn handler_panic_becomes_generic_internal_error() {
    let server = server_with(FakeProvider::new(Behavior::Panic));

    let response = server.post("/create-order").json(&json!({ "amount": 5 })).await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!response.text().contains(SECRET));
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

#[tokio::test]
async fn create_order_without_provider_fails() {
    let response = uninitialized_server()
        .post("/create-order")
        .json(&json!({ "amount": 5 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>()["error"],
        "Failed to create Razorpay order"
    );
}

#[tokio::test]
async fn create_order_rejects_malformed_json() {
    let provider = FakeProvider::new(Behavior::Succeed);
    let server = server_with(provider.clone());

    let response = server
        .post("/create-order")
        .bytes(Bytes::from_static(b"{\"amount\": "))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid request body");
    assert!(provider.calls().is_empty());
}

// =============================================================================
// /verify-payment
// =============================================================================

#[tokio::test]
async fn verify_payment_accepts_valid_signature() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .post("/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_IluGWxBm9U8zJ8",
            "razorpay_payment_id": "pay_IH4NVgf4Dreq1l",
            "razorpay_signature": sign("order_IluGWxBm9U8zJ8", "pay_IH4NVgf4Dreq1l"),
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Payment verified successfully" })
    );
}

#[tokio::test]
async fn verify_payment_rejects_tampered_signature() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let mut signature = sign("order_A", "pay_B");
    let last = if signature.ends_with('0') { "1" } else { "0" };
    signature.replace_range(signature.len() - 1.., last);

    let response = server
        .post("/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_A",
            "razorpay_payment_id": "pay_B",
            "razorpay_signature": signature,
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Payment verification failed" })
    );
}

#[tokio::test]
async fn verify_payment_rejects_swapped_ids() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .post("/verify-payment")
        .json(&json!({
            "razorpay_order_id": "pay_B",
            "razorpay_payment_id": "order_A",
            "razorpay_signature": sign("order_A", "pay_B"),
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn verify_payment_requires_every_field() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .post("/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_A",
            "razorpay_signature": "abc",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required field: razorpay_payment_id");
}

#[tokio::test]
async fn verify_payment_treats_wrong_typed_field_as_missing() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .post("/verify-payment")
        .json(&json!({
            "razorpay_order_id": 123,
            "razorpay_payment_id": "pay_B",
            "razorpay_signature": "abc",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Missing required field: razorpay_order_id" })
    );
}

#[tokio::test]
async fn verify_payment_malformed_body_keeps_response_shape() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .post("/verify-payment")
        .bytes(Bytes::from_static(b"[\"not\", \"an object\"]"))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "message": "Invalid request body" })
    );
}

#[tokio::test]
async fn verify_payment_without_provider_is_internal_error() {
    let response = uninitialized_server()
        .post("/verify-payment")
        .json(&json!({
            "razorpay_order_id": "order_A",
            "razorpay_payment_id": "pay_B",
            "razorpay_signature": "abc",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error" })
    );
}

// =============================================================================
// Routing and CORS
// =============================================================================

#[tokio::test]
async fn unknown_routes_return_not_found_for_any_method() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let response = server.method(method, "/does-not-exist").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "Endpoint not found" })
        );
    }

    // known path, wrong method
    let response = server.get("/create-order").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Endpoint not found" })
    );
}

#[tokio::test]
async fn preflight_is_answered_without_business_logic() {
    let provider = FakeProvider::new(Behavior::Succeed);
    let server = server_with(provider.clone());

    let response = server
        .method(Method::OPTIONS, "/create-order")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://shop.vercel.app"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("content-type"),
        )
        .await;

    assert!(response.status_code().is_success());
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://shop.vercel.app"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn disallowed_origin_gets_no_cors_headers() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://evil.example"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn allowed_origin_on_simple_request() {
    let server = server_with(FakeProvider::new(Behavior::Succeed));

    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:3000"),
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
