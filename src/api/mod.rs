//! API route modules
//!
//! - [`health`] — health check
//! - [`tables`] — venue table management and seat reporting
//! - [`guests`] — guest list, check-in and check-out

pub mod guests;
pub mod health;
pub mod middleware;
pub mod tables;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::utils::validation::MAX_PAGE_LIMIT;

/// Offset-based pagination query params, shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Page size (default 10, capped at [`MAX_PAGE_LIMIT`])
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Page offset (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

impl ListQuery {
    /// Limit and offset with the limit clamped to a sane page size.
    pub fn clamped(&self) -> (i64, i64) {
        (
            self.limit.clamp(0, MAX_PAGE_LIMIT),
            self.offset.max(0),
        )
    }
}

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(guests::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging - method, matched path, status, latency
        .layer(axum_middleware::from_fn(middleware::log_requests))
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - generate a unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        // Propagate request ID to the response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
