//! Request handlers for the frames endpoint.
//!
//! Every device-facing route answers with a `frames` document, even for errors, unknown
//! paths and panics, so the device never has to deal with a malformed reply.
use axum::{
    Json,
    extract::State,
    http::{
        HeaderMap, HeaderValue, Method, StatusCode, Uri,
        header::{CACHE_CONTROL, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use log::{error, info, warn};
use serde_json::json;
use std::any::Any;
use ticker_common::pipeline::{SERVER_ERROR_TEXT, message_frame, respond};
use ticker_common::{DisplayConfig, FrameResponse};

use crate::server::AppState;

/// Text shown when the server was started without credentials.
pub const MISSING_KEY_TEXT: &str = "Missing POLYGON_API_KEY";

fn json_headers(no_cache: bool) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if no_cache {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    headers
}

/// Hand-built body for when the frames document itself cannot be produced.
pub(crate) fn server_error_body(config: &DisplayConfig) -> Vec<u8> {
    format!(
        r#"{{"frames":[{{"text":"{}","icon":{},"index":0}}]}}"#,
        SERVER_ERROR_TEXT,
        config.icons.default.get()
    )
    .into_bytes()
}

/// Serialize `response` with the configured cache policy.
pub(crate) fn frames_response(
    status: StatusCode,
    response: &FrameResponse,
    config: &DisplayConfig,
) -> Response {
    let body = response.to_json_bytes().unwrap_or_else(|e| {
        error!("Failed to serialize frames to JSON: {}", e);
        server_error_body(config)
    });
    (status, json_headers(config.no_cache), body).into_response()
}

/// Produce the frames document for the configured symbols.
pub async fn current_frames(state: &AppState) -> FrameResponse {
    match &state.source {
        Some(source) => respond(&source.fetch(&state.config.symbols).await, &state.config),
        None => message_frame(MISSING_KEY_TEXT, &state.config),
    }
}

/// `GET /` and `GET /frames`.
pub async fn frames_handler(State(state): State<AppState>) -> Response {
    let response = current_frames(&state).await;
    info!("Serving {} frames", response.frames.len());
    frames_response(StatusCode::OK, &response, &state.config)
}

/// `GET /health`; never touches the provider.
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Any path without a route.
pub async fn not_found_handler(State(state): State<AppState>, uri: Uri) -> Response {
    warn!("No route for {}", uri.path());
    frames_response(
        StatusCode::NOT_FOUND,
        &message_frame("Not found", &state.config),
        &state.config,
    )
}

/// A known path requested with an unsupported method.
pub async fn method_not_allowed_handler(State(state): State<AppState>, method: Method) -> Response {
    warn!("Rejected method {}", method);
    frames_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &message_frame("Method not allowed", &state.config),
        &state.config,
    )
}

/// Response for a request whose handler panicked.
pub fn panic_response(config: &DisplayConfig, err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| err.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    error!("Request handler panicked: {}", detail);
    (StatusCode::OK, json_headers(config.no_cache), server_error_body(config)).into_response()
}
