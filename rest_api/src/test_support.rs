// rest_api/src/test_support.rs

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use lib::fixtures::test_database;
use lib::{Database, LabConfig};

use crate::build_router;
use crate::config::ServiceKind;
use crate::state::AppState;

pub async fn test_app(service: ServiceKind) -> (Router, Database, TempDir) {
    let (db, dir) = test_database().await;
    let app = build_router(AppState::new(db.clone(), LabConfig::default(), service));
    (app, db, dir)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    send_raw(app, method, uri, &body).await
}

/// Sends `body` verbatim and decodes the response as JSON (`Null` when empty).
pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if !body.is_empty() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}
