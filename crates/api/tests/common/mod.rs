#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use prsk_core::store::MemoryStore;
use prsk_db::Backend;
use tower::ServiceExt;

use prsk_api::config::ServerConfig;
use prsk_api::router::build_app_router;
use prsk_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and `system` as the fallback actor.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_actor: "system".to_string(),
        database_url: None,
        db_max_connections: 1,
    }
}

/// Build the full application router over the given in-memory store.
///
/// Clones of one `MemoryStore` share their tables, so several apps built from
/// the same store see each other's writes.
pub fn build_test_app(store: MemoryStore) -> Router {
    let config = test_config();
    let state = AppState::new(Backend::Memory(store), config.clone());
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body, None)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body, None)).await
}

/// Like [`post_json`] but with an `X-Actor` header.
pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    actor: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, body, Some(actor))).await
}

/// Like [`put_json`] but with an `X-Actor` header.
pub async fn put_json_as(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    actor: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, body, Some(actor))).await
}

fn json_request(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    actor: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(actor) = actor {
        builder = builder.header("x-actor", actor);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an artist and return its id.
pub async fn create_artist(store: &MemoryStore, name: &str) -> i64 {
    let app = build_test_app(store.clone());
    let response = post_json(app, "/api/v1/artists", serde_json::json!({ "artist_name": name })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
