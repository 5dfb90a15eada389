//! HTTP-level integration tests for the `/users` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use prsk_core::store::MemoryStore;
use serde_json::json;

async fn create_user(store: &MemoryStore, name: &str) -> i64 {
    let app = common::build_test_app(store.clone());
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": name, "password": "hunter2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_user_never_returns_password() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": "kanade", "password": "25ji"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["user_name"], "kanade");
    assert!(json.get("password").is_none());
    assert!(json["audit_info"].is_object());
}

#[tokio::test]
async fn test_user_name_is_unique_among_live_users_only() {
    let store = MemoryStore::new();
    let id = create_user(&store, "mafuyu").await;

    let app = common::build_test_app(store.clone());
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": "mafuyu", "password": "other"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["details"][0]["field"], "user_name");

    // Names are case-sensitive.
    let app = common::build_test_app(store.clone());
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": "Mafuyu", "password": "other"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(store.clone());
    assert_eq!(
        delete(app, &format!("/api/v1/users/{id}")).await.status(),
        StatusCode::NO_CONTENT
    );

    let app = common::build_test_app(store);
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": "mafuyu", "password": "again"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_user_requires_password() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": "ena", "password": ""}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "password");
}

#[tokio::test]
async fn test_user_name_longer_than_20_is_rejected() {
    let app = common::build_test_app(MemoryStore::new());
    let response = post_json(
        app,
        "/api/v1/users",
        json!({"user_name": "m".repeat(21), "password": "pw"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_password_only() {
    let store = MemoryStore::new();
    let id = create_user(&store, "mizuki").await;

    let app = common::build_test_app(store.clone());
    let response = put_json(
        app,
        &format!("/api/v1/users/{id}"),
        json!({"password": "new-secret"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user_name"], "mizuki");
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_update_user_to_empty_name_is_rejected() {
    let store = MemoryStore::new();
    let id = create_user(&store, "emu").await;

    let app = common::build_test_app(store);
    let response = put_json(app, &format!("/api/v1/users/{id}"), json!({"user_name": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users_sorted_by_name() {
    let store = MemoryStore::new();
    for name in ["tsukasa", "rui", "nene"] {
        create_user(&store, name).await;
    }

    let app = common::build_test_app(store);
    let json = body_json(get(app, "/api/v1/users?sort_by=user_name").await).await;
    let names: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["user_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["nene", "rui", "tsukasa"]);
    assert!(json["items"][0].get("password").is_none());
}
