// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::extract::State;
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use qci_client::config::Config;
use qci_client::db::MemoryStore;
use qci_client::App;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request as seen by the mock backend.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub test_header: Option<String>,
}

#[allow(dead_code)]
pub type Seen = Arc<Mutex<Vec<SeenRequest>>>;

/// Create a test app over in-memory storage pointed at `api_base`.
#[allow(dead_code)]
pub fn create_test_app(api_base: &str) -> App {
    let config = Config {
        api_base: api_base.to_string(),
        ..Config::default()
    };
    App::new(config, Arc::new(MemoryStore::new())).expect("Failed to build test app")
}

/// Start an in-process backend on an ephemeral port.
/// Returns its base URL and the log of requests it received.
#[allow(dead_code)]
pub async fn spawn_backend() -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/propuestas", get(record).post(record))
        .route("/propuestas/{id}/votos", post(record))
        .route(
            "/propuestas/{id}/cerrar",
            post(|| async { StatusCode::CREATED }),
        )
        .route("/ideas/{id}", put(|| async { StatusCode::NO_CONTENT }))
        .route("/actividades", post(record))
        .route("/comunidades", post(record))
        .route("/ideas", get(record).post(record).put(record))
        .route(
            "/fallo",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/lento",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "ok": true }))
            }),
        )
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });

    (format!("http://{}", addr), seen)
}

#[allow(dead_code)]
async fn record(
    State(seen): State<Seen>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Json<Value> {
    seen.lock().unwrap().push(SeenRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header_value(&headers, AUTHORIZATION.as_str()),
        test_header: header_value(&headers, "x-qci-test"),
    });

    let body: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    Json(json!({ "path": uri.path(), "body": body }))
}

#[allow(dead_code)]
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
