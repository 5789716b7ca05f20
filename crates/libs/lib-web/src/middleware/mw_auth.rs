//! # Authentication Middleware
//!
//! Axum middleware for bearer token validation and role checks.
//!
//! [`require_auth`] extracts the JWT from the `Authorization` header, loads
//! the user it names and injects a [`CurrentUser`] into the request
//! extensions. [`require_admin`] runs after it and rejects callers whose role
//! is not `admin`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/users/me", get(read_me))
//!     .route_layer(from_fn(require_admin))
//!     .route_layer(from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! Handlers then extract the caller with `Extension<CurrentUser>`:
//!
//! ```rust,ignore
//! async fn read_me(Extension(current): Extension<CurrentUser>) -> Json<UserRead> {
//!     Json(current.into())
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension,
};
use lib_auth::decode_jwt;
use lib_core::dto::UserRead;
use lib_core::model::rbac::ROLE_ADMIN;
use lib_core::model::store::models::UserWithRole;
use lib_core::model::store::UserRepository;
use lib_core::AppError;
use tracing::{debug, warn};

use crate::server::AppState;

/// The authenticated caller, with its role.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserWithRole);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.user.id
    }

    pub fn role_id(&self) -> i64 {
        self.0.user.role_id
    }

    pub fn is_admin(&self) -> bool {
        self.0.role_name == ROLE_ADMIN
    }
}

impl From<CurrentUser> for UserRead {
    fn from(current: CurrentUser) -> Self {
        UserRead::from(current.0)
    }
}

/// Authentication middleware that validates bearer tokens.
///
/// # Behavior
///
/// - **Valid token for an active user**: continues with [`CurrentUser`] in extensions
/// - **Missing, malformed, expired or forged token**: `401 Unauthorized`
/// - **Unknown or deactivated user**: `401 Unauthorized`
///
/// Every rejection carries the same message and `WWW-Authenticate: Bearer`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| {
            warn!("[AUTH] Missing or malformed Authorization header");
            AppError::invalid_credentials()
        })?;

    let claims = decode_jwt(token, &state.config.jwt_secret).map_err(|e| {
        warn!("[AUTH] JWT validation failed: {}", e);
        AppError::invalid_credentials()
    })?;
    let user_id = claims.user_id()?;

    let user = UserRepository::find_with_role(&state.db, user_id)
        .await?
        .filter(|u| u.user.is_active)
        .ok_or_else(|| {
            warn!("[AUTH] Token subject {} is unknown or inactive", user_id);
            AppError::invalid_credentials()
        })?;

    debug!("[AUTH] Authenticated user {} (role: {})", user.user.id, user.role_name);

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

/// Admin guard. Must run after [`require_auth`].
pub async fn require_admin(
    Extension(current): Extension<CurrentUser>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !current.is_admin() {
        warn!("[AUTH] User {} denied admin access", current.id());
        return Err(AppError::Forbidden("Not enough permissions".to_string()));
    }

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` value; the scheme is
/// case-insensitive.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
