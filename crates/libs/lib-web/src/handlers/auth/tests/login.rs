//! # Login Tests

use super::*;
use axum::http::header::WWW_AUTHENTICATE;
use lib_auth::decode_jwt;
use lib_core::Config;

#[tokio::test]
async fn test_login_success() {
    // Arrange
    let app = test_app().await;

    // Act
    let (status, body) = send(&app, login_request("admin@admin.com", "admin")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");

    let token = body["access_token"].as_str().unwrap();
    let claims = decode_jwt(token, &Config::for_tests().jwt_secret).unwrap();
    assert_eq!(claims.exp - claims.iat, 30 * 60);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app().await;

    let (status, body) = send(&app, login_request("user@user.com", "wrong")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect email or password");
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = test_app().await;

    let response = tower::ServiceExt::oneshot(app, login_request("ghost@example.com", "user"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");
}

#[tokio::test]
async fn test_login_after_self_delete() {
    let app = test_app().await;
    let token = login_token(&app, "user@user.com", "user").await;

    let (status, _) = send(&app, empty_request("DELETE", "/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, login_request("user@user.com", "user")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Inactive user");

    // The old token no longer authenticates either
    let (status, body) = send(&app, empty_request("GET", "/users/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Could not validate credentials");
}

#[tokio::test]
async fn test_login_form_missing_password() {
    let app = test_app().await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/users/login")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(axum::body::Body::from("username=admin%40admin.com"))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "Validation");
}
