pub mod search;
pub mod yt;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / — service banner and endpoint listing.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "resolve": "POST /api/yt",
            "search": "GET /api/search?q=",
            "health": "GET /health",
        },
    }))
}

/// GET /health — 503 when the resolver binary cannot be run.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let resolver_version = match state.resolver.version().await {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: resolver unavailable");
            None
        }
    };
    let ok = resolver_version.is_some();

    let http_status = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        http_status,
        Json(json!({
            "status": if ok { "ok" } else { "degraded" },
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "resolver": if ok { "available" } else { "unavailable" },
            "resolver_version": resolver_version,
            "search": if state.search.is_configured() { "configured" } else { "disabled" },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
