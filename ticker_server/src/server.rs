//! Router assembly and the HTTP listener.
use axum::{Router, routing::get};
use log::{error, info};
use std::any::Any;
use std::sync::Arc;
use ticker_common::DisplayConfig;
use ticker_common::net::{FRAMES_PATH, HEALTH_PATH};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::Result;
use crate::handler;
use crate::source::SnapshotSource;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline configuration.
    pub config: Arc<DisplayConfig>,
    /// Provider; `None` when no API key was configured.
    pub source: Option<Arc<dyn SnapshotSource>>,
}

impl AppState {
    /// Bundle configuration and provider.
    pub fn new(config: DisplayConfig, source: Option<Arc<dyn SnapshotSource>>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}

/// All routes, with panics turned into a `Server error` frame.
pub fn router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    Router::new()
        .route("/", get(handler::frames_handler))
        .route(FRAMES_PATH, get(handler::frames_handler))
        .route(HEALTH_PATH, get(handler::health_handler))
        .fallback(handler::not_found_handler)
        .method_not_allowed_fallback(handler::method_not_allowed_handler)
        .layer(CatchPanicLayer::custom(
            move |err: Box<dyn Any + Send + 'static>| handler::panic_response(&config, err),
        ))
        .with_state(state)
}

/// Bind `bind` and serve until Ctrl+C.
pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    info!("Registering routes:");
    info!("  GET /");
    info!("  GET {}", FRAMES_PATH);
    info!("  GET {}", HEALTH_PATH);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Frames HTTP server is started on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received. Shutting down server..."),
        Err(e) => {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderMap, Method, Request, StatusCode, header::CACHE_CONTROL};
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use ticker_common::{Symbol, UpstreamOutcome};
    use tower::ServiceExt;

    struct Canned {
        body: &'static str,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SnapshotSource for Canned {
        async fn fetch(&self, _symbols: &[Symbol]) -> UpstreamOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            UpstreamOutcome::classify(200, self.body.as_bytes())
        }
    }

    struct Exploding;

    #[async_trait]
    impl SnapshotSource for Exploding {
        async fn fetch(&self, _symbols: &[Symbol]) -> UpstreamOutcome {
            panic!("provider client exploded")
        }
    }

    fn config() -> DisplayConfig {
        DisplayConfig {
            symbols: Symbol::parse_list("AAPL,NVDA").unwrap(),
            ..DisplayConfig::default()
        }
    }

    fn state_counting(body: &'static str, calls: Arc<AtomicUsize>) -> AppState {
        AppState::new(config(), Some(Arc::new(Canned { body, calls })))
    }

    fn state_with(body: &'static str) -> AppState {
        state_counting(body, Arc::new(AtomicUsize::new(0)))
    }

    async fn send(state: AppState, method: Method, uri: &str) -> (StatusCode, HeaderMap, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
        (status, headers, body)
    }

    fn json_of(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn frames_route_renders_snapshot() {
        let state = state_with(
            r#"{"status":"OK","tickers":[{"ticker":"AAPL","lastTrade":{"p":191.25},"prevDay":{"c":190.0}}]}"#,
        );
        let (status, headers, body) = send(state, Method::GET, "/frames").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[CACHE_CONTROL], "no-store");
        let body = json_of(&body);
        let frames = body["frames"].as_array().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0]["text"], "Market: 1 N/A");
        assert_eq!(frames[1]["text"], "AAPL 191.25 ▲+0.66%");
        assert_eq!(frames[2]["text"], "NVDA N/A");
        assert_eq!(frames[2]["index"], 2);
    }

    #[tokio::test]
    async fn root_path_serves_frames_too() {
        let state = state_with(r#"{"status":"ERROR","error":"rate limited"}"#);
        let (status, _, body) = send(state, Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_of(&body),
            json!({ "frames": [{ "text": "rate limited", "icon": 42844, "index": 0 }] })
        );
    }

    #[tokio::test]
    async fn absolute_form_target_is_routed_by_path() {
        let state = state_with(r#"{"status":"OK","tickers":[]}"#);
        let (status, _, body) = send(state, Method::GET, "http://device-host:8080/frames").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body)["frames"][0]["text"], "No data available");
    }

    #[tokio::test]
    async fn head_request_has_no_body() {
        let state = state_with(r#"{"status":"OK","tickers":[]}"#);
        let (status, _, body) = send(state, Method::HEAD, "/frames").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn missing_key_serves_configuration_frame() {
        let state = AppState::new(DisplayConfig::default(), None);
        let (_, _, body) = send(state, Method::GET, "/frames").await;
        assert_eq!(json_of(&body)["frames"][0]["text"], "Missing POLYGON_API_KEY");
    }

    #[tokio::test]
    async fn unknown_path_and_method_still_carry_frames() {
        let (status, _, body) = send(state_with("{}"), Method::GET, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json_of(&body)["frames"][0]["text"], "Not found");

        let (status, _, body) = send(state_with("{}"), Method::POST, "/frames").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(json_of(&body)["frames"][0]["text"], "Method not allowed");
    }

    #[tokio::test]
    async fn health_does_not_touch_provider() {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = state_counting("{}", Arc::clone(&calls));
        let (status, _, body) = send(state.clone(), Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_of(&body), json!({ "status": "ok" }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        send(state, Method::GET, "/frames").await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_source_still_yields_server_error_frame() {
        let state = AppState::new(config(), Some(Arc::new(Exploding)));
        let (status, _, body) = send(state, Method::GET, "/frames").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json_of(&body),
            json!({ "frames": [{ "text": "Server error", "icon": 42844, "index": 0 }] })
        );
    }
}
