//! # Authentication Data Transfer Objects
//!
//! Defines request and response structures for the `/users` authentication
//! endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /users/register` - [`RegisterRequest`] -> [`UserRead`](super::UserRead)
//! - `POST /users/login` - [`LoginForm`] (form-urlencoded) -> [`TokenResponse`]
//! - `POST /users/logout` - -> [`MessageResponse`]
//!
//! ## Wire Format
//!
//! All DTOs use **snake_case** field names in JSON (default serde behavior).
//!
//! ### Login Flow
//!
//! ```text
//! POST /users/login
//! Content-Type: application/x-www-form-urlencoded
//!
//! username=alice%40example.com&password=secret
//! ```
//!
//! Response:
//! ```text
//! {
//!   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "token_type": "bearer"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN};
use crate::error::AppError;
use lib_utils::{validate_email, validate_length};

/// Registration request for a new account.
///
/// # Validation Rules
///
/// - `email` must be a well-formed address
/// - `password` and `repeat_password` must be 3-72 characters and equal
///
/// Failures are reported as `422 Unprocessable Entity`.
///
/// # JSON Example
///
/// ```json
/// {
///   "email": "alice@example.com",
///   "password": "secret",
///   "repeat_password": "secret",
///   "name": "Alice"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub repeat_password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_credentials(&self.email, &self.password, &self.repeat_password)
    }
}

/// Check an email plus a password typed twice.
pub fn validate_credentials(email: &str, password: &str, repeat_password: &str) -> Result<(), AppError> {
    validate_email(email).map_err(AppError::Validation)?;
    validate_length(password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN, "password").map_err(AppError::Validation)?;
    validate_length(repeat_password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN, "repeat_password")
        .map_err(AppError::Validation)?;

    if password != repeat_password {
        return Err(AppError::Validation("Passwords do not match".to_string()));
    }

    Ok(())
}

/// OAuth2 password-flow login form. `username` carries the email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: lib_auth::TOKEN_TYPE.to_string(),
        }
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body produced by [`AppError`]'s `IntoResponse` implementation.
///
/// # JSON Example
///
/// ```json
/// { "error": "Incorrect email or password", "code": "Unauthorized" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
