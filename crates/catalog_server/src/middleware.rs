//! Request middleware: API key enforcement and access logging.

use crate::AppState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_core::{GateDecision, API_KEY_HEADER, UNAUTHORIZED_BODY};
use log::{info, warn};
use std::time::Instant;

/// Runs the API key gate before any handler.
///
/// Rejected requests never reach the router; they get 401 with a fixed
/// plaintext body.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // A header that is not valid visible ASCII can never equal the key.
    let header_value = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.to_str().unwrap_or_default());

    let decision = state.gate().check(request.uri().path(), header_value);
    match decision {
        GateDecision::Forward => next.run(request).await,
        GateDecision::Reject(reason) => {
            warn!(
                "event=auth_reject module=http status=unauthorized method={} path={} reason={}",
                request.method(),
                request.uri().path(),
                reason.as_str()
            );
            (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response()
        }
    }
}

/// Logs method, path, status and latency of every request.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}
