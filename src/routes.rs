//! Router configuration for the redirect HTTP surface.
//!
//! # Route Structure
//!
//! - `GET /redirect?item=&user_id=` - create a short link (302 to `/{code}`)
//! - `GET /{code}`                  - short link redirect (302 to target)
//! - `GET /health`                  - liveness check
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Rate limiting** - per-IP token bucket on the public surface
//! - **Path normalization** - trailing slash handling

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower::Layer;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};
use tower_http::LatencyUnit;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::handlers::{create_redirect_handler, health_handler, redirect_handler};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// Rate limits are keyed by the peer socket address, so the server must be
/// started with connect-info (see [`crate::server::run`]).
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/redirect", get(create_redirect_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(rate_limit_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        );

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Per-IP token bucket for the public endpoints: 2 requests per second
/// with a burst of 100. Requests over the limit receive `429`.
fn rate_limit_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(100)
            .finish()
            .unwrap(),
    );

    GovernorLayer::new(governor_conf)
}
