//! # User Handlers
//!
//! The caller's own record, plus user reads guarded by the access rules of
//! the `users` business element.

use axum::{
    extract::{Json, State},
    Extension,
};
use lib_core::dto::{MessageResponse, UserRead, UserUpdateRequest};
use lib_core::model::rbac::{Action, ELEMENT_USERS};
use lib_core::{AppError, DbPool};

use crate::extract::{JsonBody, PathParams};
use crate::middleware::CurrentUser;
use crate::services::{AccessService, UserService};

pub async fn read_me(Extension(current): Extension<CurrentUser>) -> Json<UserRead> {
    Json(current.into())
}

/// Partial profile update; only `name`, `surname` and `last_name` are accepted.
pub async fn update_me(
    State(pool): State<DbPool>,
    Extension(current): Extension<CurrentUser>,
    JsonBody(req): JsonBody<UserUpdateRequest>,
) -> Result<Json<UserRead>, AppError> {
    let user = UserService::new(pool).update_profile(current.id(), req).await?;
    Ok(Json(user))
}

/// Soft delete of the caller's account. The current token stops working.
pub async fn delete_me(
    State(pool): State<DbPool>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::new(pool).deactivate(current.id()).await?;
    Ok(Json(MessageResponse::new("User deactivated")))
}

/// Every user. Requires `read_all_permission` on `users`.
pub async fn list_users(
    State(pool): State<DbPool>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<Vec<UserRead>>, AppError> {
    AccessService::new(pool.clone())
        .check(current.role_id(), ELEMENT_USERS, Action::Read, false)
        .await?;

    let users = UserService::new(pool).list().await?;
    Ok(Json(users))
}

/// One user. `read_all_permission` allows any id; `read_permission` allows
/// only the caller's own id.
pub async fn read_user(
    State(pool): State<DbPool>,
    Extension(current): Extension<CurrentUser>,
    PathParams(id): PathParams<i64>,
) -> Result<Json<UserRead>, AppError> {
    AccessService::new(pool.clone())
        .check(current.role_id(), ELEMENT_USERS, Action::Read, id == current.id())
        .await?;

    let user = UserService::new(pool).get(id).await?;
    Ok(Json(user))
}
