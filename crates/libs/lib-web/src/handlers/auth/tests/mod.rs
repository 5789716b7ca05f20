//! # Auth Handler Tests
//!
//! Test suite for registration, login and logout, driven through the full
//! router.

mod login;

use crate::test_support::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_logout_requires_token() {
    let app = test_app().await;

    let (status, _) = send(&app, empty_request("POST", "/users/logout", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login_token(&app, "user@user.com", "user").await;
    let (status, body) = send(&app, empty_request("POST", "/users/logout", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Successfully logged out" }));
}
