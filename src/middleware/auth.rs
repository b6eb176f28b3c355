use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::router::AppState;

/// Shared-secret gate run before every route.
///
/// Reads `Authorization` as-is (no scheme stripping) and hands it to the
/// configured verifier. On rejection the request never reaches a handler.
pub async fn auth_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if !state.verifier.verify(header) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            header_present = header.is_some(),
            "rejected unauthorized request"
        );
        return ApiError::unauthorized("unauthorized").into_response();
    }

    next.run(request).await
}
