//! # Admin Handlers
//!
//! Account and access rule management. Every route here sits behind
//! [`require_admin`](crate::middleware::require_admin), so callers without
//! the `admin` role receive `403 Forbidden` before these handlers run.

use axum::extract::{Json, State};
use lib_core::dto::{AccessRuleRead, AccessRuleUpdate, MessageResponse, UserCreateRequest, UserRead, UserRoleUpdate};
use lib_core::{AppError, DbPool};
use tracing::instrument;

use crate::extract::{JsonBody, PathParams};
use crate::services::{AccessService, UserService};

/// Create an account with an optional explicit role.
///
/// # Returns
///
/// * `Ok(Json<UserRead>)` - the created account
/// * `Err(AppError::InvalidInput)` - email already registered (400)
/// * `Err(AppError::NotFound)` - `role_id` does not exist (404)
/// * `Err(AppError::Validation)` - malformed email or password (422)
#[instrument(skip_all, fields(email = %req.email, role_id = ?req.role_id))]
pub async fn create_user(
    State(pool): State<DbPool>,
    JsonBody(req): JsonBody<UserCreateRequest>,
) -> Result<Json<UserRead>, AppError> {
    let user = UserService::new(pool).create_by_admin(req).await?;
    Ok(Json(user))
}

/// Move a user to another role. Unknown user or role → 404.
pub async fn update_user_role(
    State(pool): State<DbPool>,
    PathParams(user_id): PathParams<i64>,
    JsonBody(req): JsonBody<UserRoleUpdate>,
) -> Result<Json<UserRead>, AppError> {
    let user = UserService::new(pool).change_role(user_id, req.role_id).await?;
    Ok(Json(user))
}

pub async fn list_access_rules(State(pool): State<DbPool>) -> Result<Json<Vec<AccessRuleRead>>, AppError> {
    let rules = AccessService::new(pool).list_rules().await?;
    Ok(Json(rules))
}

/// Partial update of the permission flags of one (role, element) rule.
/// Absent flags keep their value; unknown flag names are rejected (422).
pub async fn update_access_rule(
    State(pool): State<DbPool>,
    PathParams((role_id, element_id)): PathParams<(i64, i64)>,
    JsonBody(update): JsonBody<AccessRuleUpdate>,
) -> Result<Json<MessageResponse>, AppError> {
    AccessService::new(pool).update_rule(role_id, element_id, &update).await?;
    Ok(Json(MessageResponse::new("Access rule updated")))
}
