#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use yoga_app::config::{CorsConfig, JwtConfig};
use yoga_app::router::init_router;
use yoga_app::state::AppState;
use yoga_auth::create_access_token;
use yoga_db::{MemoryStore, Store};

pub use yoga_db::fixtures::{ADMIN_EMAIL, FIXTURE_PASSWORD};

pub const ADMIN_ID: i64 = 1;
pub const JEAN_ID: i64 = 2;
pub const CLAIRE_ID: i64 = 3;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

/// Router over a freshly seeded in-memory store.
pub fn setup_test_app() -> Router {
    let store = Store::in_memory(MemoryStore::seeded().unwrap());
    setup_test_app_with_store(store)
}

pub fn setup_test_app_with_store(store: Store) -> Router {
    let state = AppState::new(store, test_jwt_config(), CorsConfig::default());
    init_router(state)
}

/// Mints a token directly, standing in for a logged-in user.
pub fn token_for(user_id: i64, email: &str, admin: bool) -> String {
    create_access_token(user_id, email, admin, &test_jwt_config()).unwrap()
}

pub fn admin_token() -> String {
    token_for(ADMIN_ID, ADMIN_EMAIL, true)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, body)
}

pub async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, "DELETE", uri, Some(token), None).await
}

pub async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await
}
