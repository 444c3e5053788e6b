//! Health check route
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/health | GET | none |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    /// healthy | degraded
    status: &'static str,
    version: &'static str,
    checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    database: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    status: &'static str,
    latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Health check with a database ping
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let db_start = std::time::Instant::now();
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => CheckResult {
            status: "ok",
            latency_ms: Some(db_start.elapsed().as_millis() as u64),
            message: None,
        },
        Err(e) => CheckResult {
            status: "error",
            latency_ms: None,
            message: Some(format!("Database error: {e}")),
        },
    };

    let status = if database.status == "ok" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database },
    })
}
