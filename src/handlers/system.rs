use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::router::AppState;

/// GET / - Service name, version and routes
pub async fn root() -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Ok(ApiResponse::success(json!({
        "name": "Customer API",
        "version": version,
        "endpoints": {
            "customers": "/customers[/:id]",
            "health": "/health",
        }
    })))
}

/// GET /health - Store round-trip; 503 when the database is unreachable
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => Ok(ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            Err(ApiError::service_unavailable(format!("database unavailable: {}", e)))
        }
    }
}

/// Fallback for paths with no route
pub async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
