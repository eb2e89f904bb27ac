//! HTTP route handlers.
//!
//! Route groups are merged into one router. The health and registry groups
//! carry `Cache-Control: no-store`: both report live state, and the health
//! endpoint in particular is polled by load balancers that must never see a
//! cached document.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod cola;
pub mod health;
pub mod hello;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_NO_STORE;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Greeting - static content
    let hello_routes = Router::new().route("/hello", get(hello::hello));

    // Health - always fresh for liveness probes
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    // Registry - stateful, never cached
    let cola_routes = Router::new()
        .route("/cola", get(cola::get))
        .route("/cola/register", post(cola::register))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    Router::new()
        .merge(hello_routes)
        .merge(health_routes)
        .merge(cola_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
