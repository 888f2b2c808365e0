//! # Routes
//!
//! Axum router configuration for the relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, request::Parts, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
///   - GET  /health         - Liveness and provider status
///   - POST /create-order   - Create a provider order
///   - POST /verify-payment - Verify a checkout callback signature
///
/// Anything else, including a known path with the wrong method, answers 404.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config.allowed_origins.clone());

    Router::new()
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        .route(
            "/create-order",
            post(handlers::create_order).fallback(handlers::not_found),
        )
        .route(
            "/verify-payment",
            post(handlers::verify_payment).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        // Middleware
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}

/// CORS for the configured frontends. Preflights are answered here and never
/// reach a handler.
fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let allowed = Arc::new(allowed_origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| allowed.iter().any(|pattern| origin_matches(pattern, o)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
}

/// Exact match, or `scheme://*.domain` matching one or more leading labels.
pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    match pattern.split_once("*.") {
        Some((prefix, suffix)) => origin
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_suffix(suffix))
            .and_then(|labels| labels.strip_suffix('.'))
            .map(|labels| {
                !labels.is_empty()
                    && labels
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            })
            .unwrap_or(false),
        None => pattern == origin,
    }
}
