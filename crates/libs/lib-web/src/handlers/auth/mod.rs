//! # Authentication Handlers
//!
//! HTTP request handlers for the `/users` authentication endpoints.
//!
//! ## Overview
//!
//! - Registration with email and a password typed twice
//! - OAuth2 password-flow login (form body, `username` holds the email)
//! - Stateless logout
//!
//! Tokens are HS256 JWTs whose `sub` is the user id. Logout does not revoke
//! anything; the token simply stops being used by the client.

use axum::{
    extract::{Json, State},
    Extension,
};
use lib_core::dto::{LoginForm, MessageResponse, RegisterRequest, TokenResponse, UserRead};
use lib_core::{AppError, Config, DbPool};
use tracing::{info, instrument};

use crate::extract::{FormBody, JsonBody};
use crate::middleware::CurrentUser;
use crate::services::UserService;

/// Register handler - creates a new account with the `user` role.
///
/// # Returns
///
/// * `Ok(Json<UserRead>)` - the created account
/// * `Err(AppError::Validation)` - malformed email, password out of bounds, or passwords differ (422)
/// * `Err(AppError::InvalidInput)` - email already registered (400)
#[instrument(skip_all, fields(email = %req.email))]
pub async fn register(
    State(pool): State<DbPool>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<Json<UserRead>, AppError> {
    info!("[REGISTER] New registration request");
    let user = UserService::new(pool).register(req).await?;
    Ok(Json(user))
}

/// Login handler - exchanges credentials for a bearer token.
///
/// # Returns
///
/// * `Ok(Json<TokenResponse>)` - `{ "access_token": ..., "token_type": "bearer" }`
/// * `Err(AppError::Unauthorized)` - unknown email, wrong password, or inactive account (401)
#[instrument(skip_all, fields(email = %form.username))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    info!("[LOGIN] Login attempt");
    let token = UserService::new(pool)
        .login(&config, &form.username, &form.password)
        .await?;
    Ok(Json(token))
}

pub async fn logout(Extension(current): Extension<CurrentUser>) -> Json<MessageResponse> {
    info!("[LOGOUT] User {} logged out", current.id());
    Json(MessageResponse::new("Successfully logged out"))
}

#[cfg(test)]
mod tests;
