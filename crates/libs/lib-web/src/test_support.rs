//! Shared fixtures for handler and service tests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use lib_core::model::store::create_memory_pool;
use lib_core::{Config, DbPool};
use serde_json::Value;
use tower::ServiceExt;

use crate::server::{create_router, prepare_database, AppState};

/// In-memory database at head with seed data, including the demo accounts
/// `user@user.com` / `user` and `manager@manager.com` / `manager`.
pub async fn seeded_pool() -> DbPool {
    let pool = create_memory_pool().await.expect("Failed to create test database");
    prepare_database(&pool, &Config::for_tests())
        .await
        .expect("Failed to prepare test database");
    pool
}

/// Full application router over a seeded database.
pub async fn test_app() -> Router {
    let state = AppState::new(seeded_pool().await, Config::for_tests());
    create_router(state, &[])
}

/// Send `request` and return the status with the JSON body (`Null` when the
/// body is empty or not JSON).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            email.replace('@', "%40"),
            password
        )))
        .unwrap()
}

/// Log in and return the access token.
pub async fn login_token(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(app, login_request(email, password)).await;
    assert_eq!(status, StatusCode::OK, "login failed for {email}: {body}");
    body["access_token"].as_str().unwrap().to_string()
}
