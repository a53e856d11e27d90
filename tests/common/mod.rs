#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use http::{Method, Request};

use relayserver::config::Config;
use relayserver::routes;
use relayserver::state::AppState;

pub fn test_config() -> Config {
    Config {
        port: 0,
        backend_host: "127.0.0.1".to_string(),
        backend_port: 0,
        snapshot_path: "/ventas/imprimiendo".to_string(),
        queue_capacity: 64,
        write_timeout: Duration::from_secs(5),
    }
}

/// Test relay that owns a full AppState. Each instance has an isolated
/// registry and is safe for parallel tests.
pub struct TestServer {
    pub state: AppState,
}

impl TestServer {
    /// Relay pointed at the given upstream snapshot URL.
    pub fn new(snapshot_url: String) -> Self {
        let state = AppState::with_snapshot_url(&test_config(), snapshot_url);
        Self { state }
    }

    /// Relay pointed at an upstream that refuses connections, for
    /// snapshot-failure scenarios. Port 9 (discard) is never listening.
    pub fn with_unreachable_upstream() -> Self {
        Self::new("http://127.0.0.1:9/ventas/imprimiendo".to_string())
    }

    /// Returns an Axum Router wired to this relay's state for `oneshot()` calls.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Binds a TCP listener on port 0, spawns the relay, and returns the base URL.
    pub async fn spawn(&self) -> String {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://127.0.0.1:{}", addr.port())
    }
}

/// Spawns a stand-in backend-of-record serving `snapshot` at the read path.
/// Returns the snapshot URL for `TestServer::new`.
pub async fn spawn_upstream(snapshot: serde_json::Value) -> String {
    let app = Router::new().route(
        "/ventas/imprimiendo",
        get(move || async move { axum::Json(snapshot) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}/ventas/imprimiendo", addr.port())
}

/// Spawns an upstream whose read endpoint always answers 500.
pub async fn spawn_failing_upstream() -> String {
    let app = Router::new().route(
        "/ventas/imprimiendo",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}/ventas/imprimiendo", addr.port())
}

// ---------------------------------------------------------------------------
// Request builder helpers
// ---------------------------------------------------------------------------

/// Build a request with a JSON body.
pub fn json_request(method: Method, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Parse a response body into a `serde_json::Value`.
pub async fn parse_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as plain text.
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
