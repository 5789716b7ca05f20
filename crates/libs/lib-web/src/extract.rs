//! # Request Extractors
//!
//! Wrappers over axum's `Json`, `Form` and `Path` whose rejections are
//! [`AppError`]s, so undecodable input gets the same JSON error body
//! (`422`, code `Validation`) as any other request error.

use axum::extract::{FromRequest, FromRequestParts};
use lib_core::AppError;

/// JSON request body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `application/x-www-form-urlencoded` request body.
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct FormBody<T>(pub T);

/// Typed path parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParams<T>(pub T);
